pub(in crate::app) mod controls;
mod details;
mod panels;
mod results;
