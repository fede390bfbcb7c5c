//! Hash-password command handler

use std::io::Write;

use super::output_error;
use crate::error::AppResult;
use crate::utils::password::hash_password;

/// Handler for the hash-password command
pub struct HashPasswordCommandHandler<'a> {
    password: &'a str,
}

impl<'a> HashPasswordCommandHandler<'a> {
    pub fn new(password: &'a str) -> Self {
        Self { password }
    }

    /// Print the Argon2id hash of the password
    pub fn execute<W: Write>(&self, out: &mut W) -> AppResult<()> {
        let hash = hash_password(self.password)?;
        writeln!(out, "{}", hash).map_err(output_error)
    }
}
