mod all_different;
mod linear;
