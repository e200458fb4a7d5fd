pub mod score;
pub mod wizard;
