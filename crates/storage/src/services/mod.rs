pub mod filtering;
