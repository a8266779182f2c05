pub mod area;
pub mod category;
pub mod company;
pub mod customer;
pub mod dashboard;
pub mod menu;
pub mod order;
pub mod product;
pub mod settings;
pub mod subcategory;
pub mod table;
