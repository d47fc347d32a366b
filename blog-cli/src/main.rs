use blog_client::{BlogClient, BlogClientError, BlogClientHttp, PostForm};
use clap::{Parser, Subcommand};

const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";

#[derive(Parser, Debug)]
#[clap(about = "Read and edit posts on a blog server")]
struct Cli {
    #[clap(short, long, default_value = DEFAULT_SERVER)]
    server: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List,
    Show {
        id: u64,
    },
    Create {
        #[clap(long)]
        author: String,
        #[clap(long)]
        title: String,
        #[clap(long)]
        content: String,
    },
    Update {
        id: u64,
        #[clap(long)]
        author: String,
        #[clap(long)]
        title: String,
        #[clap(long)]
        content: String,
    },
    Delete {
        id: u64,
    },
    Like {
        id: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    let client = BlogClientHttp::connect(&args.server)?;

    if let Err(err) = run(&client, args.command).await {
        if let BlogClientError::Validation { form, .. } = &err {
            eprintln!(
                "submitted: author={:?} title={:?} content={:?}",
                form.author, form.title, form.content
            );
        }
        return Err(err.into());
    }

    Ok(())
}

async fn run(client: &impl BlogClient, command: Command) -> Result<(), BlogClientError> {
    match command {
        Command::List => {
            let posts = client.list_posts().await?;
            println!("Posts ({})", posts.len());
            for post in posts {
                println!(
                    "- [{}] {} (by {}, {} likes)",
                    post.id, post.title, post.author, post.likes
                );
            }
        }
        Command::Show { id } => {
            let post = client.get_post(id).await?;
            println!("{}", post);
        }
        Command::Create {
            author,
            title,
            content,
        } => {
            let form = PostForm {
                author,
                title,
                content,
            };
            let post = client.create_post(&form).await?;
            println!("Post created! ID: {}", post.id);
        }
        Command::Update {
            id,
            author,
            title,
            content,
        } => {
            let form = PostForm {
                author,
                title,
                content,
            };
            let post = client.update_post(id, &form).await?;
            println!("Post updated: {}", post);
        }
        Command::Delete { id } => {
            client.delete_post(id).await?;
            println!("Post {} deleted (if it existed)", id);
        }
        Command::Like { id } => {
            client.like_post(id).await?;
            println!("Liked post {}", id);
        }
    }

    Ok(())
}
