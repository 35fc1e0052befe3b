mod store;
mod validate;
