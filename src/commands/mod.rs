pub mod compare;
pub mod copy;
pub mod count;
