//! DISCLAIMER: a **toy** Diffie-Hellman party over a small prime field, for demonstration only.
//! Exponents are tiny, arithmetic is not constant-time and peer keys are not authenticated.

use crate::error::{Error, Result};
use crate::math::modular::mod_pow;
use crate::random::RandomSource;
use std::fmt;
use std::ops::Range;

/// The group every party of one run agrees on: a prime modulus and a primitive root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupParams {
    /// The prime modulus.
    pub prime: u64,
    /// A primitive root modulo `prime`.
    pub root: u64,
}

impl GroupParams {
    pub fn new(prime: u64, root: u64) -> Self {
        GroupParams { prime, root }
    }
}

/// What an eavesdropper learns about an endpoint from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicView {
    /// Label of the observed endpoint.
    pub name: String,
    /// The group modulus it advertised.
    pub prime: u64,
    /// The group generator it advertised.
    pub root: u64,
    /// Its public key, `root^private mod prime`.
    pub public_key: u64,
}

/// One party of the exchange.
///
/// The private exponent is fixed at construction. The public key and shared secret start out
/// empty and are filled in by [`generate_public_key`](Self::generate_public_key) and
/// [`derive_shared_secret`](Self::derive_shared_secret); the secret is replaced whenever a new
/// peer key is supplied.
#[derive(Debug, Clone)]
pub struct Endpoint {
    name: String,
    private_exponent: u64,
    params: Option<GroupParams>,
    public_key: Option<u64>,
    shared_secret: Option<u64>,
}

impl Endpoint {
    /// An endpoint that has not been told the group yet.
    pub fn new(name: impl Into<String>, private_exponent: u64) -> Self {
        Endpoint {
            name: name.into(),
            private_exponent,
            params: None,
            public_key: None,
            shared_secret: None,
        }
    }

    pub fn with_params(name: impl Into<String>, private_exponent: u64, params: GroupParams) -> Self {
        let mut endpoint = Endpoint::new(name, private_exponent);
        endpoint.params = Some(params);
        endpoint
    }

    /// An endpoint whose private exponent is drawn uniformly from `exponent_range`.
    ///
    /// # Errors
    /// [`Error::EmptyExponentRange`] when `exponent_range` is empty.
    pub fn random<R: RandomSource + ?Sized>(
        name: impl Into<String>,
        params: GroupParams,
        exponent_range: Range<u64>,
        rng: &mut R,
    ) -> Result<Self> {
        if exponent_range.is_empty() {
            return Err(Error::EmptyExponentRange {
                lower: exponent_range.start,
                upper: exponent_range.end,
            });
        }
        let private_exponent = rng.uniform_in(exponent_range);
        Ok(Endpoint::with_params(name, private_exponent, params))
    }

    /// Sets the group. Derived keys belong to the old group, so they are cleared.
    pub fn assign_params(&mut self, params: GroupParams) {
        self.params = Some(params);
        self.public_key = None;
        self.shared_secret = None;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn private_exponent(&self) -> u64 {
        self.private_exponent
    }

    pub fn params(&self) -> Option<GroupParams> {
        self.params
    }

    pub fn public_key(&self) -> Option<u64> {
        self.public_key
    }

    pub fn shared_secret(&self) -> Option<u64> {
        self.shared_secret
    }

    fn require_params(&self) -> Result<GroupParams> {
        let params = self
            .params
            .ok_or(Error::InvalidState("group parameters have not been assigned"))?;
        if params.prime < 2 {
            return Err(Error::InvalidState("group modulus must be at least 2"));
        }
        Ok(params)
    }

    /// Computes, stores and returns `root^private mod prime`.
    pub fn generate_public_key(&mut self) -> Result<u64> {
        let params = self.require_params()?;
        let public_key = mod_pow(params.root, self.private_exponent, params.prime);
        self.public_key = Some(public_key);
        Ok(public_key)
    }

    /// Computes, stores and returns `peer_public_key^private mod prime`.
    ///
    /// The key is only range-checked. Whoever sent it is taken on trust, which is exactly the
    /// gap an interceptor exploits.
    pub fn derive_shared_secret(&mut self, peer_public_key: u64) -> Result<u64> {
        let params = self.require_params()?;
        if peer_public_key >= params.prime {
            return Err(Error::InvalidPublicKey {
                key: peer_public_key,
                prime: params.prime,
            });
        }
        let secret = mod_pow(peer_public_key, self.private_exponent, params.prime);
        self.shared_secret = Some(secret);
        Ok(secret)
    }

    /// The observable half of this endpoint. Requires a generated public key.
    pub fn public_view(&self) -> Result<PublicView> {
        let params = self.require_params()?;
        let public_key = self
            .public_key
            .ok_or(Error::InvalidState("public key has not been generated"))?;
        Ok(PublicView {
            name: self.name.clone(),
            prime: params.prime,
            root: params.root,
            public_key,
        })
    }
}

struct OrNone(Option<u64>);

impl fmt::Display for OrNone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{}", v),
            None => f.write_str("None"),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.params;
        writeln!(f, "Endpoint name: {}", self.name)?;
        writeln!(f, "Private key: {}", self.private_exponent)?;
        writeln!(f, "Prime number: {}", OrNone(params.map(|p| p.prime)))?;
        writeln!(f, "Primitive root: {}", OrNone(params.map(|p| p.root)))?;
        writeln!(f, "Public key: {}", OrNone(self.public_key))?;
        writeln!(f, "Full session key: {}", OrNone(self.shared_secret))
    }
}
