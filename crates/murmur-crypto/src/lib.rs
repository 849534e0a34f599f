/// Murmur Crypto Library
///
/// Bearer tokens are opaque random strings handed out at registration.
/// There is no hashing or expiry: whoever holds the token is the user.

pub mod tokens;
