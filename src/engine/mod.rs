pub mod alias;
pub mod conjugation;
pub mod history;
pub mod kana;
