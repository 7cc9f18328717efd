use clap::Parser;
use nextnote::application::{init, ConfigService, NotePayload, NoteService};
use nextnote::cli::{format_note, format_note_list, note_to_json, notes_to_json, Cli, Commands};
use nextnote::error::NoteError;
use nextnote::infrastructure::{open_store, Backend, NoteStore, RepositoryRoot};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("nextnote={}", level).parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), NoteError> {
    let user_flag = cli.user;

    match cli.command {
        Commands::Init { path, backend } => {
            let backend = Backend::from_str(&backend).map_err(NoteError::Config)?;
            init::init(&path, backend, user_flag.as_deref())
        }
        Commands::Config { key, value, list } => {
            let root = RepositoryRoot::discover()?;
            let service = ConfigService::new(root);

            if list {
                let config = service.list()?;
                println!("backend = {}", format!("{:?}", config.backend).to_lowercase());
                println!("user = {}", config.user);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                    Ok(())
                } else {
                    let val = service.get(&k)?;
                    println!("{}", val);
                    Ok(())
                }
            } else {
                println!("Usage: nextnote config [--list | <key> [<value>]]");
                println!("Valid keys: backend, user, created");
                Ok(())
            }
        }
        command => {
            let root = RepositoryRoot::discover()?;
            let config = root.load_config()?;
            let user = config.acting_user(user_flag.as_deref());
            let service = NoteService::new(open_store(&root, config.backend)?);
            run_note_command(command, &service, &user)
        }
    }
}

fn run_note_command(
    command: Commands,
    service: &NoteService<Box<dyn NoteStore>>,
    user: &str,
) -> Result<(), NoteError> {
    match command {
        Commands::List {
            deleted,
            group,
            json,
        } => {
            let deleted = if deleted { Some(true) } else { None };
            let notes = service.list(user, deleted, group.as_deref())?;
            if json {
                println!("{}", notes_to_json(&notes)?);
            } else {
                print!("{}", format_note_list(&notes));
            }
            Ok(())
        }
        Commands::Get { id, json } => {
            let note = service.get(id)?;
            if json {
                println!("{}", note_to_json(&note)?);
            } else {
                print!("{}", format_note(&note));
            }
            Ok(())
        }
        Commands::Create {
            title,
            group,
            note,
            json,
        } => {
            let payload = NotePayload {
                title,
                grouping: group,
                note,
                deleted: false,
            };
            let created = service.create(&payload, user)?;
            if json {
                println!("{}", note_to_json(&created)?);
            } else {
                println!("Created note {}", created.id);
            }
            Ok(())
        }
        Commands::Update {
            id,
            title,
            group,
            note,
            deleted,
            json,
        } => {
            let payload = NotePayload {
                title,
                grouping: group,
                note,
                deleted,
            };
            let updated = service.update(id, &payload, user)?;
            if json {
                println!("{}", note_to_json(&updated)?);
            } else {
                println!("Updated note {}", updated.id);
            }
            Ok(())
        }
        Commands::Rename {
            id,
            new_name,
            group,
        } => {
            let renamed = service.rename(id, &new_name, &group, user)?;
            if renamed.grouping.is_empty() {
                println!("Renamed note {} to {}", renamed.id, renamed.name);
            } else {
                println!(
                    "Renamed note {} to [{}] {}",
                    renamed.id, renamed.grouping, renamed.name
                );
            }
            Ok(())
        }
        Commands::Delete { id } => {
            if service.delete(id, user)? {
                println!("Deleted note {}", id);
                Ok(())
            } else {
                Err(NoteError::NotFound(id))
            }
        }
        Commands::Init { .. } | Commands::Config { .. } => unreachable!("handled in run"),
    }
}
