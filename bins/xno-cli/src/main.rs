//! xno-cli: offline command-line front end for Nano keys and blocks.
//!
//! Creates and imports wallets, derives accounts, converts addresses, signs
//! state blocks and seals messages between accounts. Nothing here touches
//! the network. Results are printed as JSON on stdout.
//!
//! Secrets (phrases, seeds, private keys) may be passed as flags; when a
//! flag is omitted the value is prompted for without echo.

mod config;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use rand::rngs::OsRng;
use serde_json::{Value, json};
use tracing::info;

use xno_core::address::{Address, address_to_public_key, derive_address, validate_address};
use xno_core::block::{Block, ChangeBlock, ReceiveBlock, SendBlock, parse_raw};
use xno_core::crypto::{KeyPair, blake2b_hex, sign_message, verify_message};
use xno_core::types::decode_hex32;
use xno_core::units::{Unit, convert};
use xno_core::{BlockHash, SignedBlock, Work, verify_block};
use xno_wallet::config::WalletConfig;
use xno_wallet::encryption::{decrypt, encrypt};
use xno_wallet::keys::{LegacySeed, Seed};
use xno_wallet::wallet::{Wallet, derive_accounts, derive_legacy_accounts};

/// Offline Nano key, address and block tool.
#[derive(Parser)]
#[command(name = "xno-cli")]
#[command(version, about = "Offline Nano keys, addresses and block signing.")]
struct Cli {
    /// Address prefix for output (`nano` or `xrb`). Overrides XNO_ADDRESS_PREFIX.
    #[arg(long, global = true)]
    prefix: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wallet creation, import and account derivation.
    Wallet {
        #[command(subcommand)]
        action: WalletAction,
    },
    /// Address conversion and validation.
    Address {
        #[command(subcommand)]
        action: AddressAction,
    },
    /// State block signing and verification.
    Block {
        #[command(subcommand)]
        action: BlockAction,
    },
    /// Encrypted messages between accounts.
    Box {
        #[command(subcommand)]
        action: BoxAction,
    },
    /// Sign the BLAKE2b hash of one or more strings.
    Sign(SignArgs),
    /// Verify a signature made with `sign`.
    Verify(VerifyArgs),
    /// BLAKE2b-256 of one or more strings, concatenated.
    Hash(HashArgs),
    /// Convert an amount between units.
    Convert(ConvertArgs),
}

#[derive(Subcommand)]
enum WalletAction {
    /// Create a new hierarchical wallet from fresh entropy.
    Generate(PasswordArgs),
    /// Create a new legacy wallet from a fresh seed.
    GenerateLegacy,
    /// Import a hierarchical wallet from its phrase.
    ImportMnemonic(MnemonicArgs),
    /// Import a legacy wallet from its phrase.
    ImportLegacyMnemonic(LegacyMnemonicArgs),
    /// Import a hierarchical wallet from its 128-hex-char seed.
    ImportSeed(SeedArgs),
    /// Import a legacy wallet from its 64-hex-char seed.
    ImportLegacySeed(SeedArgs),
    /// Derive a range of hierarchical accounts.
    Accounts(RangeArgs),
    /// Derive a range of legacy accounts.
    LegacyAccounts(RangeArgs),
}

#[derive(Args)]
struct PasswordArgs {
    /// Prompt for a seed password.
    #[arg(long)]
    password: bool,

    /// Use this entropy (64 hex chars) instead of fresh randomness.
    #[arg(long)]
    entropy: Option<String>,
}

#[derive(Args)]
struct MnemonicArgs {
    /// The phrase. Prompted for if omitted.
    #[arg(long)]
    mnemonic: Option<String>,

    /// Prompt for a seed password.
    #[arg(long)]
    password: bool,
}

#[derive(Args)]
struct LegacyMnemonicArgs {
    /// The phrase. Prompted for if omitted.
    #[arg(long)]
    mnemonic: Option<String>,
}

#[derive(Args)]
struct SeedArgs {
    /// Hex seed. Prompted for if omitted.
    #[arg(long)]
    seed: Option<String>,
}

#[derive(Args)]
struct RangeArgs {
    /// Hex seed. Prompted for if omitted.
    #[arg(long)]
    seed: Option<String>,

    /// First account index.
    #[arg(long, default_value_t = 0)]
    from: u32,

    /// Last account index (inclusive).
    #[arg(long)]
    to: u32,
}

#[derive(Subcommand)]
enum AddressAction {
    /// Check prefix, alphabet, length and checksum.
    Validate { address: String },
    /// Extract the public key.
    ToPublicKey { address: String },
    /// Encode a public key.
    FromPublicKey { public_key: String },
}

#[derive(Args)]
struct KeyArgs {
    /// Signing key (64 hex chars). Prompted for if omitted.
    #[arg(long)]
    private_key: Option<String>,
}

#[derive(Args)]
struct CommonBlockArgs {
    /// Account balance before this block, in raw.
    #[arg(long)]
    balance: String,

    /// Representative address.
    #[arg(long)]
    representative: String,

    /// Hash of the account's latest block (zeros when opening).
    #[arg(long)]
    frontier: String,

    /// Proof of work (16 hex chars) to attach.
    #[arg(long)]
    work: Option<String>,

    #[command(flatten)]
    key: KeyArgs,
}

#[derive(Subcommand)]
enum BlockAction {
    /// Sign a send.
    Send {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Amount to send, in raw.
        #[arg(long)]
        amount: String,
        #[command(flatten)]
        common: CommonBlockArgs,
    },
    /// Sign a receive.
    Receive {
        #[arg(long)]
        to: String,
        /// Hash of the send being received.
        #[arg(long)]
        source: String,
        /// Amount received, in raw.
        #[arg(long)]
        amount: String,
        #[command(flatten)]
        common: CommonBlockArgs,
    },
    /// Sign a representative change.
    Change {
        #[arg(long)]
        address: String,
        #[command(flatten)]
        common: CommonBlockArgs,
    },
    /// Verify a signed block given as JSON.
    Verify {
        /// Signed block JSON.
        json: String,
        /// Verify against this key instead of the block's account.
        #[arg(long)]
        public_key: Option<String>,
    },
}

#[derive(Subcommand)]
enum BoxAction {
    /// Encrypt a message to an address.
    Encrypt {
        #[arg(long)]
        to: String,
        #[arg(long)]
        message: String,
        #[command(flatten)]
        key: KeyArgs,
    },
    /// Decrypt a message from an address.
    Decrypt {
        #[arg(long)]
        from: String,
        #[arg(long)]
        message: String,
        #[command(flatten)]
        key: KeyArgs,
    },
}

#[derive(Args)]
struct SignArgs {
    #[command(flatten)]
    key: KeyArgs,

    /// Strings to sign, concatenated.
    #[arg(required = true)]
    parts: Vec<String>,
}

#[derive(Args)]
struct VerifyArgs {
    #[arg(long)]
    public_key: String,

    #[arg(long)]
    signature: String,

    /// Strings that were signed, concatenated.
    #[arg(required = true)]
    parts: Vec<String>,
}

#[derive(Args)]
struct HashArgs {
    #[arg(required = true)]
    parts: Vec<String>,
}

#[derive(Args)]
struct ConvertArgs {
    amount: String,

    /// Source unit (RAW, NANO, KRAI, MRAI, RAI).
    #[arg(long)]
    from: Unit,

    /// Target unit.
    #[arg(long)]
    to: Unit,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = config::from_env().context("Failed to load configuration")?;
    if let Some(prefix) = &cli.prefix {
        config.prefix = config::parse_prefix(prefix)?;
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let output = match cli.command {
        Commands::Wallet { action } => wallet_command(action, &config)?,
        Commands::Address { action } => address_command(action, &config)?,
        Commands::Block { action } => block_command(action)?,
        Commands::Box { action } => box_command(action)?,
        Commands::Sign(args) => {
            let keypair = KeyPair::from_private_key(read_private_key(args.key)?);
            let parts: Vec<&str> = args.parts.iter().map(String::as_str).collect();
            json!({ "signature": sign_message(&keypair, &parts) })
        }
        Commands::Verify(args) => {
            let parts: Vec<&str> = args.parts.iter().map(String::as_str).collect();
            json!({ "valid": verify_message(&args.public_key, &args.signature, &parts) })
        }
        Commands::Hash(args) => {
            let parts: Vec<&str> = args.parts.iter().map(String::as_str).collect();
            json!({ "hash": blake2b_hex(&parts) })
        }
        Commands::Convert(args) => {
            let amount = convert(&args.amount, args.from, args.to).context("Conversion failed")?;
            json!({ "amount": amount, "unit": args.to })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn wallet_command(action: WalletAction, config: &WalletConfig) -> Result<Value> {
    let wallet = match action {
        WalletAction::Generate(args) => {
            let password = read_password(args.password)?;
            match args.entropy {
                Some(entropy) => Wallet::from_entropy(&entropy, &password, config)?,
                None => Wallet::generate(&mut OsRng, &password, config)?,
            }
        }
        WalletAction::GenerateLegacy => Wallet::generate_legacy(&mut OsRng, config),
        WalletAction::ImportMnemonic(args) => {
            let phrase = read_secret(args.mnemonic, "Enter mnemonic phrase")?;
            let password = read_password(args.password)?;
            Wallet::from_mnemonic(&phrase, &password, config).context("Failed to import wallet")?
        }
        WalletAction::ImportLegacyMnemonic(args) => {
            let phrase = read_secret(args.mnemonic, "Enter mnemonic phrase")?;
            Wallet::from_legacy_mnemonic(&phrase, config).context("Failed to import wallet")?
        }
        WalletAction::ImportSeed(args) => {
            let seed = read_secret(args.seed, "Enter seed (128 hex chars)")?;
            Wallet::from_seed(&seed, config).context("Failed to import wallet")?
        }
        WalletAction::ImportLegacySeed(args) => {
            let seed = read_secret(args.seed, "Enter legacy seed (64 hex chars)")?;
            Wallet::from_legacy_seed(&seed, config).context("Failed to import wallet")?
        }
        WalletAction::Accounts(args) => {
            let seed = Seed::from_hex(&read_secret(args.seed, "Enter seed (128 hex chars)")?)?;
            let accounts = derive_accounts(&seed, args.from, args.to, config)?;
            info!(count = accounts.len(), "derived accounts");
            return Ok(serde_json::to_value(accounts)?);
        }
        WalletAction::LegacyAccounts(args) => {
            let seed =
                LegacySeed::from_hex(&read_secret(args.seed, "Enter legacy seed (64 hex chars)")?)?;
            let accounts = derive_legacy_accounts(&seed, args.from, args.to, config)?;
            info!(count = accounts.len(), "derived legacy accounts");
            return Ok(serde_json::to_value(accounts)?);
        }
    };
    Ok(serde_json::to_value(wallet)?)
}

fn address_command(action: AddressAction, config: &WalletConfig) -> Result<Value> {
    Ok(match action {
        AddressAction::Validate { address } => json!({ "valid": validate_address(&address) }),
        AddressAction::ToPublicKey { address } => {
            let public_key = address_to_public_key(&address).context("Invalid address")?;
            json!({ "public_key": hex::encode_upper(public_key) })
        }
        AddressAction::FromPublicKey { public_key } => {
            let public_key = decode_hex32(&public_key).context("Invalid public key")?;
            json!({ "address": derive_address(&public_key, config.prefix) })
        }
    })
}

fn block_command(action: BlockAction) -> Result<Value> {
    let (block, key) = match action {
        BlockAction::Send { from, to, amount, common } => {
            let block = Block::Send(SendBlock {
                wallet_balance_raw: parse_raw(&common.balance)?,
                from_address: parse_address(&from)?,
                to_address: parse_address(&to)?,
                representative_address: parse_address(&common.representative)?,
                frontier: parse_hash(&common.frontier)?,
                amount_raw: parse_raw(&amount)?,
                work: parse_work(common.work.as_deref())?,
            });
            (block, common.key)
        }
        BlockAction::Receive { to, source, amount, common } => {
            let block = Block::Receive(ReceiveBlock {
                wallet_balance_raw: parse_raw(&common.balance)?,
                to_address: parse_address(&to)?,
                representative_address: parse_address(&common.representative)?,
                frontier: parse_hash(&common.frontier)?,
                transaction_hash: parse_hash(&source)?,
                amount_raw: parse_raw(&amount)?,
                work: parse_work(common.work.as_deref())?,
            });
            (block, common.key)
        }
        BlockAction::Change { address, common } => {
            let block = Block::Change(ChangeBlock {
                wallet_balance_raw: parse_raw(&common.balance)?,
                address: parse_address(&address)?,
                representative_address: parse_address(&common.representative)?,
                frontier: parse_hash(&common.frontier)?,
                work: parse_work(common.work.as_deref())?,
            });
            (block, common.key)
        }
        BlockAction::Verify { json, public_key } => {
            let block: SignedBlock = serde_json::from_str(&json).context("Invalid block JSON")?;
            let result = match public_key {
                Some(key) => verify_block(&decode_hex32(&key).context("Invalid public key")?, &block),
                None => block.verify(),
            };
            return Ok(json!({ "valid": result.is_ok(), "hash": block.hash().to_string() }));
        }
    };

    let keypair = KeyPair::from_private_key(read_private_key(key)?);
    let signed = block.sign(&keypair).context("Failed to sign block")?;
    info!(hash = %signed.hash(), "signed block");
    Ok(json!({
        "hash": signed.hash().to_string(),
        "block": signed,
    }))
}

fn box_command(action: BoxAction) -> Result<Value> {
    Ok(match action {
        BoxAction::Encrypt { to, message, key } => {
            let private_key = read_private_key(key)?;
            let sealed = encrypt(&message, &to, &private_key, &mut OsRng)
                .context("Failed to encrypt message")?;
            json!({ "message": sealed })
        }
        BoxAction::Decrypt { from, message, key } => {
            let private_key = read_private_key(key)?;
            let opened =
                decrypt(&message, &from, &private_key).context("Failed to decrypt message")?;
            json!({ "message": opened })
        }
    })
}

fn parse_address(s: &str) -> Result<Address> {
    Address::decode(s).with_context(|| format!("Invalid address: {s}"))
}

fn parse_hash(s: &str) -> Result<BlockHash> {
    s.parse().with_context(|| format!("Invalid block hash: {s}"))
}

fn parse_work(s: Option<&str>) -> Result<Option<Work>> {
    s.map(|w| w.parse::<Work>().context("Invalid work")).transpose()
}

fn read_private_key(args: KeyArgs) -> Result<[u8; 32]> {
    let hex_key = read_secret(args.private_key, "Enter private key (64 hex chars)")?;
    decode_hex32(hex_key.trim()).context("Invalid private key")
}

/// Use the flag value, or prompt without echo.
fn read_secret(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => prompt_password(prompt),
    }
}

/// Prompt for a seed password (and its confirmation) when requested.
fn read_password(requested: bool) -> Result<String> {
    if !requested {
        return Ok(String::new());
    }
    let password = prompt_password("Enter seed password")?;
    let confirm = prompt_password("Confirm password")?;
    if password != confirm {
        bail!("Passwords do not match");
    }
    Ok(password)
}

/// Prompt for a secret securely (no echo).
fn prompt_password(prompt: &str) -> Result<String> {
    rpassword::prompt_password(format!("{prompt}: ")).context("Failed to read input")
}
