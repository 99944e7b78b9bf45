pub mod retype;
