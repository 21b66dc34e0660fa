pub mod image_provider;
