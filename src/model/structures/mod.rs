pub mod grade;
pub mod rating_class;
pub mod records;
