/// Creating affine views on top of a view.
pub trait TransformableVariable<View> {
    /// A view whose values are those of `self` multiplied by `scale`.
    fn scaled(&self, scale: i32) -> View;

    /// A view whose values are those of `self` plus `offset`.
    fn offset(&self, offset: i32) -> View;
}
