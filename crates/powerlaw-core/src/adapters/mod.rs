//! Series source implementations.

pub mod csv_codec;
pub mod file;
pub mod fixture;
pub mod remote;

pub use csv_codec::decode_price_csv;
pub use file::CsvFileSource;
pub use fixture::FixtureSource;
pub use remote::RemoteCsvSource;
