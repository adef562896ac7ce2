pub mod prospection;
