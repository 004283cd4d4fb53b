// Core modules implementing error modeling shared by every layer.
pub mod error;
