use std::fmt::Display;

/// Relations between two integer operands, used by the constraint constructors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntRelation {
    Equal,
    NotEqual,
    LessOrEqual,
    Less,
    GreaterOrEqual,
    Greater,
}

impl IntRelation {
    /// The relation which holds after swapping the operands.
    pub fn swap(self) -> IntRelation {
        match self {
            IntRelation::Equal | IntRelation::NotEqual => self,
            IntRelation::LessOrEqual => IntRelation::GreaterOrEqual,
            IntRelation::Less => IntRelation::Greater,
            IntRelation::GreaterOrEqual => IntRelation::LessOrEqual,
            IntRelation::Greater => IntRelation::Less,
        }
    }

    /// The relation which holds exactly when this one does not.
    pub fn negate(self) -> IntRelation {
        match self {
            IntRelation::Equal => IntRelation::NotEqual,
            IntRelation::NotEqual => IntRelation::Equal,
            IntRelation::LessOrEqual => IntRelation::Greater,
            IntRelation::Less => IntRelation::GreaterOrEqual,
            IntRelation::GreaterOrEqual => IntRelation::Less,
            IntRelation::Greater => IntRelation::LessOrEqual,
        }
    }

    pub fn holds(self, left: i32, right: i32) -> bool {
        match self {
            IntRelation::Equal => left == right,
            IntRelation::NotEqual => left != right,
            IntRelation::LessOrEqual => left <= right,
            IntRelation::Less => left < right,
            IntRelation::GreaterOrEqual => left >= right,
            IntRelation::Greater => left > right,
        }
    }
}

impl Display for IntRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            IntRelation::Equal => "==",
            IntRelation::NotEqual => "!=",
            IntRelation::LessOrEqual => "<=",
            IntRelation::Less => "<",
            IntRelation::GreaterOrEqual => ">=",
            IntRelation::Greater => ">",
        };

        write!(f, "{symbol}")
    }
}
