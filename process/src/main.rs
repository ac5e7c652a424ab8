use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Spreadsheet of contacts to convert
    #[arg(long, default_value = "vcard_contacts.xlsx")]
    input: String,

    /// Destination for the generated directory
    #[arg(long, default_value = "contacts.json")]
    output: String,
}

fn main() {
    let args = Args::parse();

    process::convert(&args.input, &args.output);
}
