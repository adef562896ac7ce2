pub mod api;
pub mod email_list;
pub mod links;
pub mod view;
