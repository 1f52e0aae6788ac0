pub mod resume;
pub mod translations;
