/// Durable string key-value storage.
///
/// Every operation is total: backends that hit an I/O or host error log it and
/// behave as if the key were absent. Callers never see a storage failure.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}
