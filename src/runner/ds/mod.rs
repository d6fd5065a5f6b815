pub mod collection;
pub mod error;
pub mod lazy_slot;
pub mod object;
pub mod object_property;
pub mod operations;
pub mod value;
