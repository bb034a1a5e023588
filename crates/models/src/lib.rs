pub mod db;
pub mod character;

#[cfg(test)]
mod tests;
