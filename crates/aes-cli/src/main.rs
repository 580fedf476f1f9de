//! Command-line interface for the `aes-core` engine.
//!
//! Keys, IVs and data are exchanged as hex. Whitespace and a `0x` prefix are
//! accepted on input.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use aes_core::encoding::{decode_hex, encode_hex};
use aes_core::{decrypt, encrypt, KeySize, Mode, Padding, BLOCK_SIZE};
use anyhow::{bail, ensure, Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use log::{info, warn};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// AES-128/256 in CBC or ECB mode, hex in, hex out.
#[derive(Parser)]
#[command(name = "aestool", version, author)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt data. A missing key or IV is generated and printed to stderr.
    Encrypt(CipherArgs),
    /// Decrypt data. The key (and the IV for CBC) must be supplied.
    Decrypt(CipherArgs),
    /// Print a random key, and optionally a random IV.
    Keygen {
        /// Key size in bits: 128 or 256.
        #[arg(long, value_name = "BITS", default_value = "128")]
        key_size: KeySize,
        /// Also print a 16-byte IV.
        #[arg(long, default_value_t = false)]
        iv: bool,
        /// Optional RNG seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the FIPS-197 and SP 800-38A known-answer vectors.
    Selftest,
    /// Encrypt random data with a random key and IV, then decrypt it back.
    Demo {
        /// Key size in bits: 128 or 256.
        #[arg(long, value_name = "BITS", default_value = "128")]
        key_size: KeySize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "input_file"])))]
struct CipherArgs {
    /// Chaining mode: cbc or ecb. ECB leaks repeated blocks and exists for
    /// compatibility.
    #[arg(long, default_value = "cbc")]
    mode: Mode,
    /// Key size in bits: 128 or 256. The key must match it.
    #[arg(long, value_name = "BITS", default_value = "128")]
    key_size: KeySize,
    /// Padding policy: none or pkcs7.
    #[arg(long, default_value = "none")]
    padding: Padding,
    /// Key as hex (32 or 64 characters).
    #[arg(long, value_name = "HEX")]
    key: Option<String>,
    /// IV as hex (32 characters). Only used in CBC mode.
    #[arg(long, value_name = "HEX")]
    iv: Option<String>,
    /// Input data as hex.
    #[arg(long, value_name = "HEX")]
    input: Option<String>,
    /// Read raw input bytes from a file instead.
    #[arg(long, value_name = "FILE")]
    input_file: Option<PathBuf>,
    /// Write raw output bytes to a file instead of printing hex.
    #[arg(long, value_name = "FILE")]
    output_file: Option<PathBuf>,
    /// Optional RNG seed used when a key or IV is generated.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Encrypt(args) => cmd_cipher(Direction::Encrypt, &args),
        Commands::Decrypt(args) => cmd_cipher(Direction::Decrypt, &args),
        Commands::Keygen { key_size, iv, seed } => cmd_keygen(key_size, iv, seed),
        Commands::Selftest => cmd_selftest(),
        Commands::Demo { key_size, seed } => cmd_demo(key_size, seed),
    }
}

fn cmd_cipher(direction: Direction, args: &CipherArgs) -> Result<()> {
    let (mode, padding, size) = (args.mode, args.padding, args.key_size);
    let mut rng = seeded_rng(args.seed);

    let key = resolve_key(args.key.as_deref(), size, direction, &mut rng)?;
    let iv = resolve_iv(args.iv.as_deref(), mode, direction, &mut rng)?;
    let input = read_input(args.input.as_deref(), args.input_file.as_deref())?;

    let output = match direction {
        Direction::Encrypt => encrypt(mode, padding, &key, iv.as_deref(), &input)
            .with_context(|| format!("{size} {mode} encryption failed"))?,
        Direction::Decrypt => decrypt(mode, padding, &key, iv.as_deref(), &input)
            .with_context(|| format!("{size} {mode} decryption failed"))?,
    };

    match &args.output_file {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("write {}", path.display()))?;
            info!("wrote {} bytes to {}", output.len(), path.display());
        }
        None => println!("{}", encode_hex(&output)),
    }
    Ok(())
}

fn cmd_keygen(size: KeySize, with_iv: bool, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let key = random_bytes(&mut rng, size.key_len());
    println!("key: {}", encode_hex(&key));
    if with_iv {
        let iv = random_bytes(&mut rng, BLOCK_SIZE);
        println!("iv: {}", encode_hex(&iv));
    }
    Ok(())
}

struct KnownAnswer {
    name: &'static str,
    mode: Mode,
    key: &'static str,
    iv: Option<&'static str>,
    plaintext: &'static str,
    ciphertext: &'static str,
}

const SP800_38A_PLAIN: &str = "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51\
                               30c81c46a35ce411e5fbc1191a0a52eff69f2445df4f9b17ad2b417be66c3710";

const KNOWN_ANSWERS: &[KnownAnswer] = &[
    KnownAnswer {
        name: "FIPS-197 C.1 AES-128",
        mode: Mode::Ecb,
        key: "000102030405060708090a0b0c0d0e0f",
        iv: None,
        plaintext: "00112233445566778899aabbccddeeff",
        ciphertext: "69c4e0d86a7b0430d8cdb78070b4c55a",
    },
    KnownAnswer {
        name: "FIPS-197 C.3 AES-256",
        mode: Mode::Ecb,
        key: "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
        iv: None,
        plaintext: "00112233445566778899aabbccddeeff",
        ciphertext: "8ea2b7ca516745bfeafc49904b496089",
    },
    KnownAnswer {
        name: "SP 800-38A F.2.1 CBC-AES128",
        mode: Mode::Cbc,
        key: "2b7e151628aed2a6abf7158809cf4f3c",
        iv: Some("000102030405060708090a0b0c0d0e0f"),
        plaintext: SP800_38A_PLAIN,
        ciphertext: "7649abac8119b246cee98e9b12e9197d5086cb9b507219ee95db113a917678b2\
                     73bed6b8e3c1743b7116e69e222295163ff1caa1681fac09120eca307586e1a7",
    },
    KnownAnswer {
        name: "SP 800-38A F.2.5 CBC-AES256",
        mode: Mode::Cbc,
        key: "603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4",
        iv: Some("000102030405060708090a0b0c0d0e0f"),
        plaintext: SP800_38A_PLAIN,
        ciphertext: "f58c4c04d6e5f1ba779eabfb5f7bfbd69cfc4e967edb808d679f777bc6702c7d\
                     39f23369a9d9bacfa530e26304231461b2eb05e2c39be9fcda6c19078c6a9d1b",
    },
];

fn cmd_selftest() -> Result<()> {
    for case in KNOWN_ANSWERS {
        run_known_answer(case).with_context(|| format!("self-test {}", case.name))?;
        println!("ok: {}", case.name);
    }
    Ok(())
}

fn run_known_answer(case: &KnownAnswer) -> Result<()> {
    let key = decode_hex(case.key)?;
    let iv = case.iv.map(decode_hex).transpose()?;
    let plaintext = decode_hex(case.plaintext)?;
    let expected = decode_hex(case.ciphertext)?;

    let ciphertext = encrypt(case.mode, Padding::None, &key, iv.as_deref(), &plaintext)?;
    ensure!(ciphertext == expected, "ciphertext mismatch");
    let recovered = decrypt(case.mode, Padding::None, &key, iv.as_deref(), &ciphertext)?;
    ensure!(recovered == plaintext, "plaintext mismatch");
    Ok(())
}

fn cmd_demo(size: KeySize, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let key = random_bytes(&mut rng, size.key_len());
    let iv = random_bytes(&mut rng, BLOCK_SIZE);
    let plaintext = random_bytes(&mut rng, 40);

    let ciphertext = encrypt(Mode::Cbc, Padding::Pkcs7, &key, Some(&iv), &plaintext)?;
    let decrypted = decrypt(Mode::Cbc, Padding::Pkcs7, &key, Some(&iv), &ciphertext)?;

    println!("demo key: {}", encode_hex(&key));
    println!("iv: {}", encode_hex(&iv));
    println!("plaintext: {}", encode_hex(&plaintext));
    println!("ciphertext: {}", encode_hex(&ciphertext));
    println!("decrypted: {}", encode_hex(&decrypted));
    if decrypted != plaintext {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

/// Decodes the supplied key, or generates one when encrypting without a key.
fn resolve_key(
    key_hex: Option<&str>,
    size: KeySize,
    direction: Direction,
    rng: &mut impl RngCore,
) -> Result<Vec<u8>> {
    match key_hex {
        Some(hex) => {
            let key = decode_hex(hex).context("decode key hex")?;
            if key.len() != size.key_len() {
                bail!(
                    "Key must be {} bytes ({} hex characters) for {size}, got {}",
                    size.key_len(),
                    size.key_len() * 2,
                    key.len()
                );
            }
            Ok(key)
        }
        None if direction == Direction::Encrypt => {
            let key = random_bytes(rng, size.key_len());
            eprintln!("generated key: {}", encode_hex(&key));
            Ok(key)
        }
        None => bail!("--key is required for decryption"),
    }
}

/// Decodes the supplied IV for CBC, generating one when encrypting without it.
///
/// A missing IV on decryption is passed through so the engine reports it.
fn resolve_iv(
    iv_hex: Option<&str>,
    mode: Mode,
    direction: Direction,
    rng: &mut impl RngCore,
) -> Result<Option<Vec<u8>>> {
    if !mode.requires_iv() {
        if iv_hex.is_some() {
            warn!("IV not used in {mode}; ignoring --iv");
        }
        return Ok(None);
    }
    match iv_hex {
        Some(hex) => Ok(Some(decode_hex(hex).context("decode IV hex")?)),
        None if direction == Direction::Encrypt => {
            let iv = random_bytes(rng, BLOCK_SIZE);
            eprintln!("generated iv: {}", encode_hex(&iv));
            Ok(Some(iv))
        }
        None => Ok(None),
    }
}

fn read_input(hex: Option<&str>, path: Option<&Path>) -> Result<Vec<u8>> {
    match (hex, path) {
        (Some(hex), _) => Ok(decode_hex(hex).context("decode input hex")?),
        (None, Some(path)) => fs::read(path).with_context(|| format!("read {}", path.display())),
        (None, None) => bail!("either --input or --input-file is required"),
    }
}

fn random_bytes(rng: &mut impl RngCore, len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rng.fill_bytes(&mut bytes);
    bytes
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
