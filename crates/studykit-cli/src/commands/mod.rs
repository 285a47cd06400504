//! Command implementations.

pub mod extract;
pub mod generate;
pub mod profile;

pub use self::extract::execute_extract;
pub use self::generate::{
    build_generator, execute_mnemonics, execute_notes, execute_quiz, execute_story, save_artifact, Generated,
};
pub use self::profile::execute_profile;
