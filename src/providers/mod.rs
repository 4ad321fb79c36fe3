pub mod ispconfig;
