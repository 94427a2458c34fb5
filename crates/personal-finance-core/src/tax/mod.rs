pub mod bands;
pub mod income_tax;
pub mod national_insurance;
pub mod regional;
pub mod take_home;
