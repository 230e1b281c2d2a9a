pub mod header;
pub mod intro;
pub mod results;
pub mod submit_forms;
pub mod toaster;
