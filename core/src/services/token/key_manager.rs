//! RS256 key management for JWT signing and verification

use std::sync::Arc;

use jsonwebtoken::{DecodingKey, EncodingKey};
use once_cell::sync::OnceCell;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::{spki, DecodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use spear_shared::config::auth::JwtConfig;

use crate::errors::KeyError;

/// PEM label required for the private key (PKCS#1)
pub const RSA_PRIVATE_KEY_TAG: &str = "RSA PRIVATE KEY";

/// PEM label required for the public key (SubjectPublicKeyInfo)
pub const PUBLIC_KEY_TAG: &str = "PUBLIC KEY";

/// Parsed RS256 key pair used in JWT operations
///
/// Verification always uses the public key supplied as PEM, never one
/// derived from the private key. When the two do not belong together the
/// pair is still built; tokens it signs will then fail verification.
#[derive(Clone)]
pub struct Rs256KeyManager {
    /// Private key for signing JWTs
    encoding_key: EncodingKey,
    /// Public key for verifying JWTs
    decoding_key: DecodingKey,
    public_key: RsaPublicKey,
    matches_private_key: bool,
}

impl std::fmt::Debug for Rs256KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rs256KeyManager")
            .field("modulus_bits", &(self.public_key.size() * 8))
            .field("matches_private_key", &self.matches_private_key)
            .finish()
    }
}

impl Rs256KeyManager {
    /// Creates a key manager from PEM strings
    ///
    /// # Arguments
    ///
    /// * `private_key_pem` - `RSA PRIVATE KEY` block (PKCS#1)
    /// * `public_key_pem` - `PUBLIC KEY` block (SubjectPublicKeyInfo)
    ///
    /// # Returns
    ///
    /// * `Ok(Rs256KeyManager)` - Key manager initialized successfully
    /// * `Err(KeyError::InvalidFormat)` - A block is missing, mislabelled or not valid DER
    /// * `Err(KeyError::UnsupportedKeyType)` - The public key is not an RSA key
    pub fn from_pem_strings(private_key_pem: &str, public_key_pem: &str) -> Result<Self, KeyError> {
        let (private_key, private_der) = parse_private_key(private_key_pem)?;
        let public_key = parse_public_key(public_key_pem)?;

        let matches_private_key = private_key.to_public_key() == public_key;
        if !matches_private_key {
            tracing::warn!(
                "Configured public key does not belong to the private key; \
                 verification uses the configured public key"
            );
        }

        let encoding_key = EncodingKey::from_rsa_der(&private_der);
        let decoding_key = DecodingKey::from_rsa_raw_components(
            &public_key.n().to_bytes_be(),
            &public_key.e().to_bytes_be(),
        );

        Ok(Self {
            encoding_key,
            decoding_key,
            public_key,
            matches_private_key,
        })
    }

    /// Returns the encoding key for signing JWTs
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Returns the decoding key for verifying JWTs
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// The public key taken from the public-key PEM
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// Whether the public key is the one the private key would produce
    pub fn matches_private_key(&self) -> bool {
        self.matches_private_key
    }
}

fn parse_private_key(pem_str: &str) -> Result<(RsaPrivateKey, Vec<u8>), KeyError> {
    let block = pem::parse(pem_str).map_err(|e| KeyError::InvalidFormat {
        message: format!("private key is not PEM encoded: {}", e),
    })?;

    if block.tag() != RSA_PRIVATE_KEY_TAG {
        return Err(KeyError::InvalidFormat {
            message: format!(
                "expected a {} block, found {}",
                RSA_PRIVATE_KEY_TAG,
                block.tag()
            ),
        });
    }

    let private_key =
        RsaPrivateKey::from_pkcs1_der(block.contents()).map_err(|e| KeyError::InvalidFormat {
            message: format!("private key is not valid PKCS#1 DER: {}", e),
        })?;

    Ok((private_key, block.into_contents()))
}

fn parse_public_key(pem_str: &str) -> Result<RsaPublicKey, KeyError> {
    let block = pem::parse(pem_str).map_err(|e| KeyError::InvalidFormat {
        message: format!("public key is not PEM encoded: {}", e),
    })?;

    if block.tag() != PUBLIC_KEY_TAG {
        return Err(KeyError::InvalidFormat {
            message: format!("expected a {} block, found {}", PUBLIC_KEY_TAG, block.tag()),
        });
    }

    RsaPublicKey::from_public_key_der(block.contents()).map_err(|e| match e {
        spki::Error::OidUnknown { .. } => KeyError::UnsupportedKeyType {
            message: "public key is not an RSA key".to_string(),
        },
        other => KeyError::InvalidFormat {
            message: format!("public key is not valid DER: {}", other),
        },
    })
}

/// Parses the configured key material once and hands out the cached pair
///
/// Concurrent first calls block on a single initialization, so no caller
/// ever sees a partially built pair. A failed parse is not cached.
pub struct KeyMaterialProvider {
    private_key_pem: String,
    public_key_pem: String,
    parsed: OnceCell<Arc<Rs256KeyManager>>,
}

impl std::fmt::Debug for KeyMaterialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterialProvider")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl KeyMaterialProvider {
    pub fn new(private_key_pem: impl Into<String>, public_key_pem: impl Into<String>) -> Self {
        Self {
            private_key_pem: private_key_pem.into(),
            public_key_pem: public_key_pem.into(),
            parsed: OnceCell::new(),
        }
    }

    pub fn from_config(jwt: &JwtConfig) -> Self {
        Self::new(jwt.private_key.clone(), jwt.public_key.clone())
    }

    /// Returns the parsed key pair, parsing it on first use
    pub fn key_manager(&self) -> Result<Arc<Rs256KeyManager>, KeyError> {
        self.parsed
            .get_or_try_init(|| {
                tracing::debug!("Parsing RS256 key material");
                Rs256KeyManager::from_pem_strings(&self.private_key_pem, &self.public_key_pem)
                    .map(Arc::new)
            })
            .cloned()
    }

    /// Whether the key pair has already been parsed
    pub fn is_loaded(&self) -> bool {
        self.parsed.get().is_some()
    }
}
