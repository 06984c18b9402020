use clap::{Parser, Subcommand};
use employee_bff::employees::CreateEmployeeRequest;
use reqwest::Url;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "employee-cli")]
#[command(about = "Command-line client for the employee BFF", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every employee
    List,
    /// Case-insensitive name search
    Search { fragment: String },
    /// Fetch one employee by id
    Get { id: String },
    /// Highest salary across all employees
    HighestSalary,
    /// Names of the ten highest earners
    TopTen,
    /// Create an employee
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        salary: String,
        #[arg(long)]
        age: i32,
        #[arg(long)]
        title: String,
    },
    /// Delete an employee by id
    Delete { id: String },
}

/// `{base}/api/v1/employee/{segments...}`, each segment percent-encoded.
fn employee_url(base: &str, segments: &[&str]) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| format!("{base} cannot be a base URL"))?
        .pop_if_empty()
        .extend(["api", "v1", "employee"])
        .extend(segments);
    Ok(url)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.as_str();

    let res = match cli.command {
        Commands::List => client.get(employee_url(base, &[])?).send().await?,
        Commands::Search { fragment } => {
            client
                .get(employee_url(base, &["search", fragment.as_str()])?)
                .send()
                .await?
        }
        Commands::Get { id } => client.get(employee_url(base, &[id.as_str()])?).send().await?,
        Commands::HighestSalary => {
            client
                .get(employee_url(base, &["highestSalary"])?)
                .send()
                .await?
        }
        Commands::TopTen => {
            client
                .get(employee_url(base, &["topTenHighestEarningEmployeeNames"])?)
                .send()
                .await?
        }
        Commands::Create { name, salary, age, title } => {
            let body = CreateEmployeeRequest {
                name: Some(name),
                salary: Some(salary),
                age: Some(age),
                title: Some(title),
            };
            client.post(employee_url(base, &[])?).json(&body).send().await?
        }
        Commands::Delete { id } => client.delete(employee_url(base, &[id.as_str()])?).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        return Err(format!("BFF returned status {status}: {text}").into());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
