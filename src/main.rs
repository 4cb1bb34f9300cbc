use civic_client::catalog::{self, ServiceAction};
use civic_client::flow::FlowController;
use civic_client::models::identification::LookupOutcome;
use civic_client::{AppContext, Config, FlowState, SubmitOutcome, init_tracing};

fn print_usage(bin_name: &str) {
    eprintln!("Usage:");
    eprintln!("  {bin_name} login <identification> <password>");
    eprintln!("  {bin_name} register <identification> <dd/mm/yyyy>");
    eprintln!("  {bin_name} lookup <identification> <name>");
    eprintln!("  {bin_name} scan <token>");
    eprintln!("  {bin_name} services");
}

enum Command {
    Login { identification: String, password: String },
    Register { identification: String, issue_date: String },
    Lookup { identification: String, name: String },
    Scan { token: String },
    Services,
}

impl Command {
    fn parse(args: &[String]) -> Option<Self> {
        match args {
            [cmd, identification, password] if cmd == "login" => Some(Command::Login {
                identification: identification.clone(),
                password: password.clone(),
            }),
            [cmd, identification, issue_date] if cmd == "register" => Some(Command::Register {
                identification: identification.clone(),
                issue_date: issue_date.clone(),
            }),
            [cmd, identification, name] if cmd == "lookup" => Some(Command::Lookup {
                identification: identification.clone(),
                name: name.clone(),
            }),
            [cmd, token] if cmd == "scan" => Some(Command::Scan { token: token.clone() }),
            [cmd] if cmd == "services" => Some(Command::Services),
            _ => None,
        }
    }
}

fn print_services() {
    for item in catalog::directory() {
        let action = match catalog::resolve(&item) {
            ServiceAction::Dial(uri) => format!("dial {uri}"),
            ServiceAction::OpenIdentification => "open identification".to_string(),
            ServiceAction::Open(kind) => format!("open {}", kind.as_str()),
        };
        println!("{:<16} {}", item.title, action);
    }
}

/// Prints the flow result and returns the process exit code.
fn report<T: Clone>(flow: &FlowController<T>, outcome: SubmitOutcome, describe: impl Fn(&T) -> String) -> i32 {
    if let Err(err) = outcome.ensure_completed() {
        eprintln!("{err}");
        return 1;
    }

    match flow.state() {
        FlowState::Success(value) => {
            println!("{}", describe(&value));
            0
        }
        FlowState::Failed(failure) => {
            eprintln!("{}: {}", failure.title, failure.message);
            1
        }
        FlowState::Idle | FlowState::Submitting => 1,
    }
}

fn describe_lookup(outcome: &LookupOutcome) -> String {
    let Some(record) = outcome.record() else {
        return "No employee found".to_string();
    };

    let fields = [
        ("Name", &record.name),
        ("Document", &record.document_number),
        ("Department", &record.department),
        ("Entity", &record.entity),
        ("Blood type", &record.blood_type),
        ("Valid until", &record.valid_until),
    ];
    fields
        .iter()
        .filter_map(|(label, value)| value.as_deref().map(|value| format!("{label}: {value}")))
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let mut args = std::env::args();
    let bin_name = args.next().unwrap_or_else(|| "civic".to_string());
    let rest: Vec<String> = args.collect();

    let Some(command) = Command::parse(&rest) else {
        print_usage(&bin_name);
        std::process::exit(2);
    };

    if let Command::Services = command {
        print_services();
        return;
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level, config.logging.json_format);

    let context = match AppContext::from_config(config).await {
        Ok(context) => context,
        Err(err) => {
            eprintln!("Failed to start: {err}");
            std::process::exit(1);
        }
    };

    let code = match command {
        Command::Login { identification, password } => {
            let outcome = context.login(&identification, &password).await;
            report(context.login_flow(), outcome, |session| {
                let name = session.user.display_name().unwrap_or_else(|| identification.clone());
                format!("Signed in as {name}")
            })
        }
        Command::Register { identification, issue_date } => {
            let outcome = context.validate_registration(&identification, &issue_date).await;
            report(context.registration_flow(), outcome, |result| {
                let mut lines = vec![result.message.clone()];
                lines.extend(result.security_questions.iter().map(|question| format!("  - {question}")));
                lines.join("\n")
            })
        }
        Command::Lookup { identification, name } => {
            let outcome = context.lookup_employee(&identification, &name).await;
            report(context.identification_flow(), outcome, describe_lookup)
        }
        Command::Scan { token } => {
            let outcome = context.scan_employee_qr(&token).await;
            report(context.identification_flow(), outcome, describe_lookup)
        }
        Command::Services => 0,
    };

    std::process::exit(code);
}
