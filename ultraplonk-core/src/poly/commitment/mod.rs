pub mod kzg;
