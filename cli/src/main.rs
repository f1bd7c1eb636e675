// cli/src/main.rs — sigdocctl: signed document CLI entrypoint
// Maintained by ek@nonos-tech.xyz | © 2025 NØN Technologies

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde_json::json;
use uuid::Uuid;

use sigdoc::config::Config;
use sigdoc::docs::keys::{self, KeyProtection};
use sigdoc::{
    check, check_trusted, logging, store, Document, DocumentSigner, Paragraph, SigDocError, SignatureArtifact,
    SignerId, TrustRegistry, Verdict,
};

#[derive(Parser)]
#[command(
    name = "sigdocctl",
    version,
    about = "sigdocctl — sign documents and verify them against trusted signers",
    long_about = "sigdocctl canonicalizes structured documents, signs them with RSA-PSS, \
                  and verifies signed pairs either against the embedded key or a registry of trusted signer keys."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (TOML)
    #[arg(long, global = true, env = "SIGDOC_CONFIG")]
    config: Option<PathBuf>,

    /// Enable JSON output
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    Keys {
        #[command(subcommand)]
        action: KeysAction,
    },
    Doc {
        #[command(subcommand)]
        action: DocAction,
    },
    /// Sign a document file and write the (document, signature) pair
    Sign {
        #[arg(long)]
        doc: PathBuf,
        /// Private key; defaults to `keys.private_key` from the config
        #[arg(long)]
        key: Option<PathBuf>,
        #[command(flatten)]
        password: PasswordArg,
        #[arg(long)]
        signator: SignerId,
        #[arg(long)]
        out: PathBuf,
    },
    /// Verify a pair against the public key embedded in it
    Verify {
        #[arg(long)]
        pair: PathBuf,
    },
    /// Verify a pair and require the signer to be trusted
    VerifyTrusted {
        #[arg(long)]
        pair: PathBuf,
        /// Extra trusted signer as ID=PUBLIC_KEY_PEM (repeatable)
        #[arg(long = "trust", value_parser = parse_trust)]
        trust: Vec<(SignerId, PathBuf)>,
    },
    /// Print a pair without verifying it
    Show {
        #[arg(long)]
        pair: PathBuf,
    },
}

#[derive(Subcommand)]
enum KeysAction {
    /// Generate a new RSA key pair
    Generate {
        #[arg(long)]
        out: PathBuf,
        /// Also write the public key here
        #[arg(long)]
        public: Option<PathBuf>,
        #[command(flatten)]
        password: PasswordArg,
        /// Key size; defaults to `keys.bits` from the config
        #[arg(long)]
        bits: Option<usize>,
    },
    /// Print the public key of a private key file
    Public {
        #[arg(long)]
        key: PathBuf,
        #[command(flatten)]
        password: PasswordArg,
    },
}

#[derive(Subcommand)]
enum DocAction {
    /// Create an unsigned document file
    New {
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        author: i64,
        #[arg(long)]
        addressee: i64,
        #[arg(long)]
        parent: Option<Uuid>,
        /// Paragraph as FIXED|PLACEHOLDER|TEXT (repeatable, order is kept)
        #[arg(long = "paragraph", value_parser = parse_paragraph)]
        paragraphs: Vec<Paragraph>,
    },
}

#[derive(Args)]
struct PasswordArg {
    /// Private key password (empty = unencrypted)
    #[arg(long, env = "SIGDOC_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

impl PasswordArg {
    fn protection(&self) -> KeyProtection {
        KeyProtection::from_password(self.password.clone())
    }
}

fn parse_paragraph(raw: &str) -> Result<Paragraph, String> {
    let parts: Vec<&str> = raw.splitn(3, '|').collect();
    match parts.as_slice() {
        [fixed, placeholder, text] => Ok(Paragraph::new(*fixed, *placeholder, *text)),
        _ => Err(format!("expected FIXED|PLACEHOLDER|TEXT, got '{raw}'")),
    }
}

fn parse_trust(raw: &str) -> Result<(SignerId, PathBuf), String> {
    let (id, path) = raw.split_once('=').ok_or_else(|| format!("expected ID=PATH, got '{raw}'"))?;
    let id = id.trim().parse::<SignerId>().map_err(|e| format!("bad signer id '{id}': {e}"))?;
    Ok((id, PathBuf::from(path)))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[config] {e}");
            return ExitCode::from(2);
        }
    };
    logging::init(&config.log.level);

    match run(cli, &config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("[sigdoc] error: {e}");
            ExitCode::from(2)
        }
    }
}

/// `Ok(false)` means the command ran but the signature was rejected.
fn run(cli: Cli, config: &Config) -> sigdoc::Result<bool> {
    match cli.command {
        Commands::Keys { action } => match action {
            KeysAction::Generate { out, public, password, bits } => {
                let mut signer = DocumentSigner::new();
                signer.generate_key(bits.unwrap_or(config.keys.bits))?;
                signer.save_key(&out, &password.protection())?;
                if let Some(public) = &public {
                    keys::save_public(signer.key()?, public)?;
                }
                let fp = keys::fingerprint(&signer.public_key_pem()?)?;
                if cli.json {
                    print_json(&json!({ "private_key": out, "public_key": public, "fingerprint": fp }));
                } else {
                    println!("[keys] private key written to {}", out.display());
                    if let Some(public) = &public {
                        println!("[keys] public key written to {}", public.display());
                    }
                    println!("[keys] fingerprint {fp}");
                }
            }
            KeysAction::Public { key, password } => {
                let signer = DocumentSigner::from_file(&key, &password.protection())?;
                let pem = signer.public_key_pem()?;
                if cli.json {
                    print_json(&json!({ "public_key": pem, "fingerprint": keys::fingerprint(&pem)? }));
                } else {
                    print!("{pem}");
                }
            }
        },

        Commands::Doc { action } => match action {
            DocAction::New { out, author, addressee, parent, paragraphs } => {
                let mut doc = Document::new(author, addressee, paragraphs);
                if let Some(parent) = parent {
                    doc = doc.with_parent(parent);
                }
                store::save_document(&doc, &out)?;
                if cli.json {
                    print_json(&json!({ "id": doc.id, "path": out }));
                } else {
                    println!("[doc] {} created with {} paragraph(s) -> {}", doc.id, doc.content.len(), out.display());
                }
            }
        },

        Commands::Sign { doc, key, password, signator, out } => {
            let key = key
                .or_else(|| config.keys.private_key.clone())
                .ok_or(SigDocError::NoKey)?;
            let signer = DocumentSigner::from_file(&key, &password.protection())?;
            let document = store::load_document(&doc)?;
            let artifact = signer.sign(&document, signator)?;
            store::save(&document, &artifact, &out)?;
            if cli.json {
                print_json(&json!({ "document_id": document.id, "signator_id": signator, "path": out }));
            } else {
                println!("[sign] document {} signed as {} -> {}", document.id, signator, out.display());
            }
        }

        Commands::Verify { pair } => {
            let (document, artifact) = store::load(&pair)?;
            let verdict = check(&document, &artifact);
            report("verify", &pair, &artifact, verdict, cli.json);
            return Ok(verdict.is_valid());
        }

        Commands::VerifyTrusted { pair, trust } => {
            let registry = config.trust_registry()?;
            add_trusted(&registry, &trust)?;
            let (document, artifact) = store::load(&pair)?;
            let verdict = check_trusted(&document, &artifact, &registry);
            report("verify-trusted", &pair, &artifact, verdict, cli.json);
            return Ok(verdict.is_valid());
        }

        Commands::Show { pair } => {
            let (document, artifact) = store::load(&pair)?;
            show(&document, &artifact, cli.json);
        }
    }
    Ok(true)
}

fn add_trusted(registry: &TrustRegistry, extra: &[(SignerId, PathBuf)]) -> sigdoc::Result<()> {
    for (id, path) in extra {
        registry.add(*id, keys::load_public(path)?)?;
    }
    Ok(())
}

fn report(tag: &str, pair: &Path, artifact: &SignatureArtifact, verdict: Verdict, as_json: bool) {
    if as_json {
        print_json(&json!({
            "valid": verdict.is_valid(),
            "reason": verdict.rejection().map(|r| r.to_string()),
            "document_id": artifact.document_id,
            "signator_id": artifact.signator_id,
        }));
        return;
    }
    match verdict {
        Verdict::Valid => println!(
            "[{tag}] {} {} (document {}, signator {})",
            pair.display(),
            "VALID".green().bold(),
            artifact.document_id,
            artifact.signator_id
        ),
        Verdict::Invalid(reason) => println!("[{tag}] {} {} :: {reason}", pair.display(), "INVALID".red().bold()),
    }
}

fn show(document: &Document, artifact: &SignatureArtifact, as_json: bool) {
    if as_json {
        print_json(&json!({ "document": document, "signature": artifact }));
        return;
    }
    println!("[doc] id: {}", document.id);
    if let Some(parent) = document.parent_document_id {
        println!("[doc] parent: {parent}");
    }
    println!("[doc] author: {} -> addressee: {}", document.author_id, document.addressee_id);
    println!("[doc] created: {}", document.created_at.to_rfc3339());
    for (i, p) in document.content.iter().enumerate() {
        println!("[doc] #{i} {} <{}> {}", p.fixed_text, p.placeholder, p.text);
    }
    println!("[sig] signator: {}", artifact.signator_id);
    println!("[sig] signed at: {} (not covered by the signature)", artifact.signed_at.to_rfc3339());
    match keys::fingerprint(&artifact.public_key) {
        Ok(fp) => println!("[sig] key fingerprint: {fp}"),
        Err(e) => println!("[sig] key unreadable: {e}"),
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("[sigdoc] json output failed: {e}"),
    }
}
