//! Built-in key format schemas for the standard Tink key types

/// Key formats for the key managers shipped with Tink
pub(crate) const BUILTIN_SCHEMAS: &str = r#"
# Shared enums (common.proto, tink.proto)
[enums.HashType]
UNKNOWN_HASH = 0
SHA1 = 1
SHA384 = 2
SHA256 = 3
SHA512 = 4
SHA224 = 5

[enums.EllipticCurveType]
UNKNOWN_CURVE = 0
NIST_P256 = 2
NIST_P384 = 3
NIST_P521 = 4
CURVE25519 = 5

[enums.EcdsaSignatureEncoding]
UNKNOWN_ENCODING = 0
IEEE_P1363 = 1
DER = 2

[enums.OutputPrefixType]
UNKNOWN_PREFIX = 0
TINK = 1
LEGACY = 2
RAW = 3
CRUNCHY = 4

[messages.KeyTemplate]
fields = [
    { name = "type_url", number = 1, type = "string" },
    { name = "value", number = 2, type = "bytes" },
    { name = "output_prefix_type", number = 3, type = "enum", type_name = "OutputPrefixType" },
]

# AEAD
[messages.AesGcmKeyFormat]
fields = [
    { name = "key_size", number = 2, type = "uint32" },
    { name = "version", number = 3, type = "uint32" },
]

[messages.AesGcmSivKeyFormat]
fields = [
    { name = "version", number = 1, type = "uint32" },
    { name = "key_size", number = 2, type = "uint32" },
]

[messages.AesEaxParams]
fields = [
    { name = "iv_size", number = 1, type = "uint32" },
]

[messages.AesEaxKeyFormat]
fields = [
    { name = "params", number = 1, type = "message", type_name = "AesEaxParams" },
    { name = "key_size", number = 2, type = "uint32" },
]

[messages.AesCtrParams]
fields = [
    { name = "iv_size", number = 1, type = "uint32" },
]

[messages.AesCtrKeyFormat]
fields = [
    { name = "params", number = 1, type = "message", type_name = "AesCtrParams" },
    { name = "key_size", number = 2, type = "uint32" },
]

[messages.AesCtrHmacAeadKeyFormat]
fields = [
    { name = "aes_ctr_key_format", number = 1, type = "message", type_name = "AesCtrKeyFormat" },
    { name = "hmac_key_format", number = 2, type = "message", type_name = "HmacKeyFormat" },
]

[messages.ChaCha20Poly1305KeyFormat]

[messages.XChaCha20Poly1305KeyFormat]
fields = [
    { name = "version", number = 1, type = "uint32" },
]

[messages.KmsAeadKeyFormat]
fields = [
    { name = "key_uri", number = 1, type = "string" },
]

[messages.KmsEnvelopeAeadKeyFormat]
fields = [
    { name = "kek_uri", number = 1, type = "string" },
    { name = "dek_template", number = 2, type = "message", type_name = "KeyTemplate" },
]

# Deterministic AEAD
[messages.AesSivKeyFormat]
fields = [
    { name = "key_size", number = 1, type = "uint32" },
    { name = "version", number = 2, type = "uint32" },
]

# MAC
[messages.HmacParams]
fields = [
    { name = "hash", number = 1, type = "enum", type_name = "HashType" },
    { name = "tag_size", number = 2, type = "uint32" },
]

[messages.HmacKeyFormat]
fields = [
    { name = "params", number = 1, type = "message", type_name = "HmacParams" },
    { name = "key_size", number = 2, type = "uint32" },
    { name = "version", number = 3, type = "uint32" },
]

[messages.AesCmacParams]
fields = [
    { name = "tag_size", number = 1, type = "uint32" },
]

[messages.AesCmacKeyFormat]
fields = [
    { name = "key_size", number = 1, type = "uint32" },
    { name = "params", number = 2, type = "message", type_name = "AesCmacParams" },
]

# Signatures
[messages.EcdsaParams]
fields = [
    { name = "hash_type", number = 1, type = "enum", type_name = "HashType" },
    { name = "curve", number = 2, type = "enum", type_name = "EllipticCurveType" },
    { name = "encoding", number = 3, type = "enum", type_name = "EcdsaSignatureEncoding" },
]

[messages.EcdsaKeyFormat]
fields = [
    { name = "params", number = 2, type = "message", type_name = "EcdsaParams" },
    { name = "version", number = 3, type = "uint32" },
]

[messages.Ed25519KeyFormat]
fields = [
    { name = "version", number = 1, type = "uint32" },
]

# Streaming AEAD
[messages.AesGcmHkdfStreamingParams]
fields = [
    { name = "ciphertext_segment_size", number = 1, type = "uint32" },
    { name = "derived_key_size", number = 2, type = "uint32" },
    { name = "hkdf_hash_type", number = 3, type = "enum", type_name = "HashType" },
]

[messages.AesGcmHkdfStreamingKeyFormat]
fields = [
    { name = "params", number = 1, type = "message", type_name = "AesGcmHkdfStreamingParams" },
    { name = "key_size", number = 2, type = "uint32" },
    { name = "version", number = 3, type = "uint32" },
]

[key_types]
"type.googleapis.com/google.crypto.tink.AesGcmKey" = "AesGcmKeyFormat"
"type.googleapis.com/google.crypto.tink.AesGcmSivKey" = "AesGcmSivKeyFormat"
"type.googleapis.com/google.crypto.tink.AesEaxKey" = "AesEaxKeyFormat"
"type.googleapis.com/google.crypto.tink.AesCtrHmacAeadKey" = "AesCtrHmacAeadKeyFormat"
"type.googleapis.com/google.crypto.tink.ChaCha20Poly1305Key" = "ChaCha20Poly1305KeyFormat"
"type.googleapis.com/google.crypto.tink.XChaCha20Poly1305Key" = "XChaCha20Poly1305KeyFormat"
"type.googleapis.com/google.crypto.tink.KmsAeadKey" = "KmsAeadKeyFormat"
"type.googleapis.com/google.crypto.tink.KmsEnvelopeAeadKey" = "KmsEnvelopeAeadKeyFormat"
"type.googleapis.com/google.crypto.tink.AesSivKey" = "AesSivKeyFormat"
"type.googleapis.com/google.crypto.tink.HmacKey" = "HmacKeyFormat"
"type.googleapis.com/google.crypto.tink.AesCmacKey" = "AesCmacKeyFormat"
"type.googleapis.com/google.crypto.tink.EcdsaPrivateKey" = "EcdsaKeyFormat"
"type.googleapis.com/google.crypto.tink.Ed25519PrivateKey" = "Ed25519KeyFormat"
"type.googleapis.com/google.crypto.tink.AesGcmHkdfStreamingKey" = "AesGcmHkdfStreamingKeyFormat"
"#;

#[cfg(test)]
mod tests {
    use crate::schema::{FieldKind, SchemaLookup, SchemaRegistry};

    const TINK: &str = "type.googleapis.com/google.crypto.tink.";

    #[test]
    fn test_builtin_registry_loads() {
        let registry = SchemaRegistry::default();
        assert_eq!(registry.type_urls().count(), 14);
        for type_url in registry.type_urls() {
            assert!(type_url.starts_with(TINK), "{}", type_url);
        }
    }

    #[test]
    fn test_builtin_hmac_schema() {
        let registry = SchemaRegistry::default();
        let schema = registry
            .lookup_schema(&format!("{}HmacKey", TINK))
            .expect("HmacKey should be registered");
        assert_eq!(schema.field_names(), vec!["params", "key_size", "version"]);
        match &schema.fields()[0].kind {
            FieldKind::Message(params) => {
                assert_eq!(params.name, "HmacParams");
                assert_eq!(params.field_names(), vec!["hash", "tag_size"]);
            }
            other => panic!("Expected message, got {:?}", other),
        }
    }

    #[test]
    fn test_builtin_empty_key_format() {
        let registry = SchemaRegistry::default();
        let schema = registry
            .lookup_schema(&format!("{}ChaCha20Poly1305Key", TINK))
            .expect("ChaCha20Poly1305Key should be registered");
        assert!(schema.fields().is_empty());
    }
}
