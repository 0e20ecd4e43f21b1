pub mod date;
pub mod excel_date;
pub mod fs;
pub mod path;
pub mod table;
