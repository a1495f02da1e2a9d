use clap::Parser;
use std::io::{self, Write};
use word_math_rs::{Embeddings, Evaluator};

#[derive(Parser, Debug)]
#[command(author, version, about = "Vector arithmetic on word embeddings", long_about = None)]
struct Args {
    /// Path to the embeddings file (one 'word v1 v2 .. vN' entry per line)
    #[arg(value_name = "FILE", default_value = "vectors.txt")]
    embeddings: String,

    /// Number of nearest words to display per expression
    #[arg(short = 'n', long, default_value_t = 5)]
    top_n: usize,
}

const HELP_TEXT: &str = "
word-math - Vector arithmetic on word embeddings

Commands:
  <expr>           Evaluate expression, show nearest words
  name = <expr>    Store result in variable
  vars             List defined variables
  help             Show this help
  exit             Quit

Examples:
  king - man + woman
  royalty = king - man
  royalty + cat
";

fn download_instructions(path: &str) -> String {
    format!(
        "Embeddings not found at '{path}'. Download GloVe embeddings:\n\n\
         1. Download: https://nlp.stanford.edu/data/glove.6B.zip\n\
         2. Extract glove.6B.300d.txt\n\
         3. Run again with the extracted file as the FILE argument\n"
    )
}

fn get_input() -> io::Result<String> {
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if !std::path::Path::new(&args.embeddings).exists() {
        eprintln!("{}", download_instructions(&args.embeddings));
        std::process::exit(1);
    }

    println!("Loading embeddings...");
    let embeddings = Embeddings::from_file(&args.embeddings)?;
    println!("Loaded {} words", embeddings.len());
    println!("Type \"help\" for commands.\n");

    let mut evaluator = Evaluator::new(&embeddings);

    loop {
        print!("> ");
        io::stdout().flush()?;
        let input = get_input()?;

        if input.is_empty() {
            continue;
        }

        // Shell commands are intercepted before the expression parser
        match input.as_str() {
            "exit" | "quit" => {
                println!("Goodbye!");
                break;
            }
            "help" => {
                println!("{HELP_TEXT}");
                continue;
            }
            "vars" => {
                let mut vars = evaluator.list_variables();
                if vars.is_empty() {
                    println!("  No variables defined");
                } else {
                    vars.sort_unstable();
                    for v in vars {
                        println!("  {v}    <vector>");
                    }
                }
                continue;
            }
            _ => {}
        }

        match evaluator.evaluate(&input) {
            Ok(result) => {
                if let Some(name) = &result.assignment {
                    println!("  [stored as '{name}']");
                } else {
                    let top = embeddings.nearest(&result.vector, args.top_n, &result.used_words);
                    for (word, similarity) in top {
                        println!("  {word:<15} {similarity:.3}");
                    }
                }
            }
            Err(err) => println!("  Error: {err}"),
        }
    }

    Ok(())
}
