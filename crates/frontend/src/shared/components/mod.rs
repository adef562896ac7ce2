pub mod business_card;

pub use business_card::BusinessCard;
