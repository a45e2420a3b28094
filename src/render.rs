//! Terminal output for posts, comments, and profiles.

use chrono::Local;
use prettytable::{Cell, Row, Table};

use crate::models::{Comment, Post, UserProfile};
use crate::session::Session;

pub fn post_table(posts: &[Post]) -> Table {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("ID"),
        Cell::new("Title"),
        Cell::new("Author"),
        Cell::new("Tags"),
    ]));

    for post in posts {
        let tags = if post.tags.is_empty() {
            "-".to_string()
        } else {
            post.tags
                .iter()
                .map(|tag| tag.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        table.add_row(Row::new(vec![
            Cell::new(&post.id.to_string()),
            Cell::new(&post.title),
            Cell::new(&post.author_name),
            Cell::new(&tags),
        ]));
    }

    table
}

pub fn print_post_list(posts: &[Post], heading: &str) {
    if posts.is_empty() {
        println!("📭 No posts found.");
        return;
    }

    println!("\n📋 {} ({})\n", heading, posts.len());
    post_table(posts).printstd();
    println!();
}

pub fn print_post_detail(post: &Post) {
    println!("\n📝 {}", post.title);
    println!("═══════════════════════════════════════");
    println!("👤 Posted by: {} (@{})", post.author_name, post.username);
    if !post.tags.is_empty() {
        let tags = post
            .tags
            .iter()
            .map(|tag| tag.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        println!("🏷️  Tags: {}", tags);
    }
    println!("\n{}", post.description);
}

/// Hint lines for what the viewer can do with a post. Anyone logged in can
/// favorite and comment; editing and deleting stay with the author.
pub fn action_lines(post: &Post, session: Option<&Session>) -> Vec<String> {
    let Some(session) = session else {
        return vec!["💡 Log in to favorite or comment on this post".to_string()];
    };

    let mut lines = vec![
        format!("💡 Favorite with: blog favorite {}", post.id),
        format!("💡 Comment with: blog comment {} -m <message>", post.id),
    ];
    if post.authored_by(&session.user) {
        lines.push(format!("💡 Edit with: blog posts edit {}", post.id));
        lines.push(format!("💡 Delete with: blog posts delete {}", post.id));
    }
    lines
}

pub fn print_actions(post: &Post, session: Option<&Session>) {
    println!();
    for line in action_lines(post, session) {
        println!("{}", line);
    }
}

/// Prints a comment thread, newest top-level comment first. Replies keep
/// the order the server sent and are indented under their parent.
pub fn print_comments(comments: &[Comment]) {
    if comments.is_empty() {
        println!("\n📭 No comments yet.");
        return;
    }

    println!("\n💬 Comments ({})\n", comments.len());
    for comment in comments.iter().rev() {
        print_comment(comment, 0);
    }
}

fn print_comment(comment: &Comment, depth: usize) {
    let indent = "    ".repeat(depth);
    let local_time = comment.created_at.with_timezone(&Local);
    println!(
        "{}👤 {} · {}",
        indent,
        comment.author_name,
        local_time.format("%Y-%m-%d %H:%M")
    );
    println!("{}   {}", indent, comment.content);
    for reply in &comment.replies {
        print_comment(reply, depth + 1);
    }
}

pub fn print_profile(profile: &UserProfile, username: &str) {
    let display_name = profile
        .authorname
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(username);

    println!("\n👤 {}", display_name);
    println!("🆔 Username: {}", username);
    match profile.bio.as_deref().filter(|bio| !bio.trim().is_empty()) {
        Some(bio) => println!("📝 Bio: {}", bio),
        None => println!("📝 Bio: No bio yet"),
    }
}
