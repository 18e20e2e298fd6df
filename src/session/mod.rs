pub mod practice;
pub mod prompt;
pub mod verb;
