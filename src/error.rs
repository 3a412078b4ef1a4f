use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The key accessor could not produce a string for the item at `index`.
    /// `field` is the record key that was asked for; closure accessors have none.
    #[error("item {index} has no string value{}", describe_field(.field))]
    InvalidKey { field: Option<String>, index: usize },

    #[error("character {0:?} appears more than once in the alphabet")]
    DuplicateCharacter(char),

    #[error("rank table could not be encoded or decoded")]
    Table(#[from] bincode::Error),
}

fn describe_field(field: &Option<String>) -> String {
    match field {
        Some(field) => format!(" for key `{field}`"),
        None => String::new(),
    }
}
