pub mod modal;
pub mod name_list;
pub mod screen;
