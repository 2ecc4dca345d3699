pub mod import;
pub mod extraction;
pub mod agenda;
pub mod letter;
pub mod archive;
pub mod processor;
pub mod diagnostic; // Intermediate artifact dump (PEMAKLUMAN_DUMP_DIR)

#[cfg(test)]
pub(crate) mod fixtures;
