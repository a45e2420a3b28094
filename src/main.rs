use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use prettytable::{Cell, Row, Table};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_cli::api::{ApiClient, ApiError};
use blog_cli::config::Config;
use blog_cli::models::{CreateCommentRequest, SavePostRequest, UpdateProfileRequest};
use blog_cli::render;
use blog_cli::session::{require_login, Session};
use blog_cli::tags::{partition, selection_from_names, selection_from_post, TagSplit};

#[derive(Parser)]
#[command(name = "blog")]
#[command(about = "A CLI tool for reading and writing blog posts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Create a new user account")]
    Signup {
        #[arg(short, long, help = "Username")]
        username: String,

        #[arg(short, long, help = "Password")]
        password: String,
    },

    #[command(about = "Log in to your account")]
    Login {
        #[arg(short, long, help = "Username")]
        username: String,

        #[arg(short, long, help = "Password")]
        password: String,
    },

    #[command(about = "Log out of your account")]
    Logout,

    #[command(about = "Show current user")]
    Whoami,

    #[command(about = "View or update your profile")]
    Profile {
        #[command(subcommand)]
        command: Option<ProfileCommands>,
    },

    #[command(about = "Browse and manage posts")]
    Posts {
        #[command(subcommand)]
        command: PostCommands,
    },

    #[command(about = "Favorite or unfavorite a post")]
    Favorite {
        #[arg(help = "Post ID")]
        post_id: i64,
    },

    #[command(about = "Comment on a post")]
    Comment {
        #[arg(help = "Post ID")]
        post_id: i64,

        #[arg(short, long, help = "The comment text")]
        message: String,

        #[arg(long, help = "ID of the comment to reply to")]
        reply_to: Option<i64>,
    },

    #[command(about = "List all tags")]
    Tags,
}

#[derive(Subcommand)]
enum ProfileCommands {
    #[command(about = "Update your display name and bio")]
    Update {
        #[arg(short, long, help = "Display name")]
        name: Option<String>,

        #[arg(short, long, help = "Short bio")]
        bio: Option<String>,
    },
}

#[derive(Subcommand)]
enum PostCommands {
    #[command(about = "List posts")]
    List {
        #[arg(long, help = "Only posts by this username")]
        by: Option<String>,
    },

    #[command(about = "Show a post with its comments")]
    Show {
        #[arg(help = "Post ID")]
        id: i64,
    },

    #[command(about = "Publish a new post")]
    Create {
        #[arg(short, long, help = "Post title")]
        title: String,

        #[arg(short, long, help = "Post description")]
        description: String,

        #[arg(long, help = "Tags (comma-separated)")]
        tags: Option<String>,
    },

    #[command(about = "Edit one of your posts")]
    Edit {
        #[arg(help = "Post ID")]
        id: i64,

        #[arg(short, long, help = "New title")]
        title: Option<String>,

        #[arg(short, long, help = "New description")]
        description: Option<String>,

        #[arg(long, help = "Tags (comma-separated), replacing the current tags")]
        tags: Option<String>,
    },

    #[command(about = "Delete one of your posts")]
    Delete {
        #[arg(help = "Post ID")]
        id: i64,
    },
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog=warn,blog_cli=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    install_tracing();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, &config).await {
        eprintln!("❌ Error: {:#}", e);
        let expired = e
            .downcast_ref::<ApiError>()
            .is_some_and(ApiError::is_unauthorized);
        if expired {
            eprintln!("💡 Your session may have expired. Use: blog login -u <username> -p <password>");
        }
        std::process::exit(1);
    }
}

async fn run_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Signup { username, password } => {
            signup(config, username, password).await?;
        }
        Commands::Login { username, password } => {
            login(config, username, password).await?;
        }
        Commands::Logout => {
            logout()?;
        }
        Commands::Whoami => {
            whoami()?;
        }
        Commands::Profile { command } => match command {
            Some(ProfileCommands::Update { name, bio }) => {
                update_profile(config, name, bio).await?;
            }
            None => {
                show_profile(config).await?;
            }
        },
        Commands::Posts { command } => match command {
            PostCommands::List { by } => {
                list_posts(config, by).await?;
            }
            PostCommands::Show { id } => {
                show_post(config, id).await?;
            }
            PostCommands::Create {
                title,
                description,
                tags,
            } => {
                create_post(config, title, description, tags).await?;
            }
            PostCommands::Edit {
                id,
                title,
                description,
                tags,
            } => {
                edit_post(config, id, title, description, tags).await?;
            }
            PostCommands::Delete { id } => {
                delete_post(config, id).await?;
            }
        },
        Commands::Favorite { post_id } => {
            favorite_post(config, post_id).await?;
        }
        Commands::Comment {
            post_id,
            message,
            reply_to,
        } => {
            comment_on_post(config, post_id, message, reply_to).await?;
        }
        Commands::Tags => {
            list_tags(config).await?;
        }
    }

    Ok(())
}

async fn signup(config: &Config, username: String, password: String) -> Result<()> {
    if username.is_empty() {
        bail!("Username cannot be empty");
    }

    if password.len() < 6 {
        bail!("Password must be at least 6 characters long");
    }

    let client = ApiClient::new(config);
    let created = client
        .signup(&username, &password)
        .await
        .context("Failed to create account")?;

    println!("✅ Account created successfully!");
    println!("👤 Username: {}", created.username);
    println!("🆔 User ID: {}", created.id);
    println!(
        "\n💡 You can now log in using: blog login -u {} -p <password>",
        created.username
    );

    Ok(())
}

async fn login(config: &Config, username: String, password: String) -> Result<()> {
    let client = ApiClient::new(config);
    let response = client
        .login(&username, &password)
        .await
        .context("Login failed")?;

    let session = Session {
        token: response.token,
        user: response.user,
    };
    session.save()?;

    println!("✅ Login successful!");
    println!("👤 Welcome back, {}!", session.user.username);

    Ok(())
}

fn logout() -> Result<()> {
    Session::clear()?;
    println!("✅ Logged out successfully!");
    Ok(())
}

fn whoami() -> Result<()> {
    if let Some(session) = Session::load() {
        println!("👤 Logged in as: {}", session.user.username);
        println!("🆔 User ID: {}", session.user.id);
    } else {
        println!("❌ Not logged in");
        println!("💡 Use 'blog login -u <username> -p <password>' to log in");
    }
    Ok(())
}

async fn show_profile(config: &Config) -> Result<()> {
    let session = require_login()?;
    let client = ApiClient::with_session(config, &session);

    let (profile, posts) = tokio::join!(
        client.current_user_data(),
        client.user_posts(&session.user.username)
    );

    let profile = profile.context("Failed to fetch profile")?;
    render::print_profile(&profile, &session.user.username);

    match posts {
        Ok(posts) => {
            // Newest first on the profile page.
            let posts = posts.into_iter().rev().collect::<Vec<_>>();
            render::print_post_list(&posts, "Your Posts");
        }
        Err(e) => warn!("Failed to fetch your posts: {}", e),
    }

    Ok(())
}

async fn update_profile(config: &Config, name: Option<String>, bio: Option<String>) -> Result<()> {
    let session = require_login()?;
    let client = ApiClient::with_session(config, &session);

    let current = client
        .current_user_data()
        .await
        .context("Failed to fetch profile")?;

    let name = name.unwrap_or_else(|| current.authorname.clone().unwrap_or_default());
    let bio = bio.unwrap_or_else(|| current.bio.clone().unwrap_or_default());

    let payload = UpdateProfileRequest::new(&name, &bio, &session.user.username);
    let updated = client
        .update_user_data(&payload)
        .await
        .context("Failed to update profile")?;

    println!("✅ Profile updated successfully!");
    render::print_profile(&updated, &session.user.username);

    match client.user_posts(&session.user.username).await {
        Ok(posts) => {
            let posts = posts.into_iter().rev().collect::<Vec<_>>();
            render::print_post_list(&posts, "Your Posts");
        }
        Err(e) => warn!("Failed to fetch your posts: {}", e),
    }

    Ok(())
}

async fn list_posts(config: &Config, by: Option<String>) -> Result<()> {
    let client = ApiClient::new(config);

    match by {
        Some(username) => {
            let posts = client
                .user_posts(&username)
                .await
                .context("Failed to fetch posts")?;
            render::print_post_list(&posts, &format!("Posts by @{}", username));
        }
        None => {
            let posts = client.posts().await.context("Failed to fetch posts")?;
            render::print_post_list(&posts, "All Posts");
        }
    }

    Ok(())
}

async fn show_post(config: &Config, id: i64) -> Result<()> {
    let session = Session::load();
    let client = match session.as_ref() {
        Some(session) => ApiClient::with_session(config, session),
        None => ApiClient::new(config),
    };

    let (post, comments) = tokio::join!(client.post(id), client.comments(id));

    let post = match post {
        Ok(post) => post,
        Err(e) if e.is_not_found() => {
            println!("📭 No post found with ID: {}", id);
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to fetch post"),
    };

    render::print_post_detail(&post);
    render::print_actions(&post, session.as_ref());
    match comments {
        Ok(comments) => render::print_comments(&comments),
        Err(e) => warn!("Failed to fetch comments: {}", e),
    }

    Ok(())
}

async fn create_post(
    config: &Config,
    title: String,
    description: String,
    tags: Option<String>,
) -> Result<()> {
    if title.trim().is_empty() {
        bail!("Title cannot be empty");
    }

    if description.trim().is_empty() {
        bail!("Description cannot be empty");
    }

    let session = require_login()?;
    let client = ApiClient::with_session(config, &session);

    let split = match tags.as_deref() {
        Some(input) => {
            let catalog = client.tags().await.context("Failed to fetch tags")?;
            let selection = selection_from_names(input, &catalog);
            partition(&selection, &catalog)
        }
        None => TagSplit::default(),
    };

    let payload = SavePostRequest::new(title, description, session.user.id, split);
    let created = client
        .create_post(&payload)
        .await
        .context("Failed to create post")?;

    println!("✅ Post created successfully!");
    println!("🆔 Post ID: {}", created.id);
    println!("💡 View it with: blog posts show {}", created.id);

    Ok(())
}

async fn edit_post(
    config: &Config,
    id: i64,
    title: Option<String>,
    description: Option<String>,
    tags: Option<String>,
) -> Result<()> {
    let session = require_login()?;
    let client = ApiClient::with_session(config, &session);

    let post = client.post(id).await.context("Failed to fetch post")?;
    if !post.authored_by(&session.user) {
        bail!("Only the author can edit this post");
    }

    // The catalog decides which selected tags already exist, so editing
    // without it would resubmit every tag as new.
    let catalog = client.tags().await.context("Failed to fetch tags")?;
    let selection = match tags.as_deref() {
        Some(input) => selection_from_names(input, &catalog),
        None => selection_from_post(&post.tags),
    };
    let split = partition(&selection, &catalog);

    let title = title.unwrap_or(post.title);
    let description = description.unwrap_or(post.description);

    if title.trim().is_empty() {
        bail!("Title cannot be empty");
    }

    if description.trim().is_empty() {
        bail!("Description cannot be empty");
    }

    let payload = SavePostRequest::new(title, description, session.user.id, split);

    client
        .update_post(id, &payload)
        .await
        .context("Failed to update post")?;

    println!("✅ Post updated successfully!");

    // Render what the server now has, not the update echo.
    let (post, comments) = tokio::join!(client.post(id), client.comments(id));
    let post = post.context("Failed to fetch the updated post")?;
    render::print_post_detail(&post);
    render::print_actions(&post, Some(&session));
    match comments {
        Ok(comments) => render::print_comments(&comments),
        Err(e) => warn!("Failed to fetch comments: {}", e),
    }

    Ok(())
}

async fn delete_post(config: &Config, id: i64) -> Result<()> {
    let session = require_login()?;
    let client = ApiClient::with_session(config, &session);

    let post = client.post(id).await.context("Failed to fetch post")?;
    if !post.authored_by(&session.user) {
        bail!("Only the author can delete this post");
    }

    client
        .delete_post(id)
        .await
        .context("Failed to delete post")?;

    println!("✅ Post deleted successfully!");

    Ok(())
}

async fn favorite_post(config: &Config, post_id: i64) -> Result<()> {
    let session = require_login()?;
    let client = ApiClient::with_session(config, &session);

    let response = client
        .toggle_favorite(post_id)
        .await
        .context("Failed to update favorite")?;

    if response.favorited {
        println!("⭐ Post added to your favorites!");
    } else {
        println!("✅ Post removed from your favorites");
    }

    Ok(())
}

async fn comment_on_post(
    config: &Config,
    post_id: i64,
    message: String,
    reply_to: Option<i64>,
) -> Result<()> {
    if message.trim().is_empty() {
        bail!("Comment cannot be empty");
    }

    let session = require_login()?;
    let client = ApiClient::with_session(config, &session);

    let payload = CreateCommentRequest {
        content: message,
        parent_id: reply_to,
    };
    client
        .create_comment(post_id, &payload)
        .await
        .context("Failed to post comment")?;

    println!("✅ Comment posted!");

    match client.comments(post_id).await {
        Ok(comments) => render::print_comments(&comments),
        Err(e) => warn!("Failed to fetch comments: {}", e),
    }

    Ok(())
}

async fn list_tags(config: &Config) -> Result<()> {
    let client = ApiClient::new(config);
    let tags = client.tags().await.context("Failed to fetch tags")?;

    if tags.is_empty() {
        println!("📭 No tags found.");
        return Ok(());
    }

    println!("\n🏷️  Tags ({})\n", tags.len());

    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("ID"), Cell::new("Name")]));
    for tag in &tags {
        table.add_row(Row::new(vec![
            Cell::new(&tag.id.to_string()),
            Cell::new(&tag.name),
        ]));
    }
    table.printstd();
    println!();

    Ok(())
}
