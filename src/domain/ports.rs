use crate::utils::error::Result;

/// Byte-level access to wherever race data lives.
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        (**self).read_file(path)
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        (**self).write_file(path, data)
    }
}

pub trait ConfigProvider {
    fn data_file(&self) -> &str;
    fn base_path(&self) -> &str;
    fn export_path(&self) -> Option<&str>;
}
