pub mod exporter;
pub mod round_counter;
pub mod round_fetcher;
pub mod round_table;
pub mod season;

#[cfg(test)]
pub(crate) mod test_provider;
