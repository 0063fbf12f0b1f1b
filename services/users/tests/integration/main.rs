
mod register_test;
