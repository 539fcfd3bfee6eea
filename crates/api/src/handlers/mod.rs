pub mod shades;
