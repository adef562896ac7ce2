pub mod my_prospection;
pub mod search_businesses;
