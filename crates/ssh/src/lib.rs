//! Reading RSA keys and signatures in the formats OpenSSH writes them.
//!
//! Public keys come from `ssh-rsa` lines as found in `.pub` and `authorized_keys` files.
//! Signatures come from `ssh-keygen -Y sign`, the armored `SSHSIG` format.

mod error;
mod key;
mod pkcs1;
mod signature;
mod wire;

pub use error::ParseError;
pub use key::{SshRsaKey, parse_authorized_keys};
pub use pkcs1::{HashAlgorithm, encode_pkcs1v15};
pub use signature::{SignatureAlgorithm, SignatureContext, SshSignature};
