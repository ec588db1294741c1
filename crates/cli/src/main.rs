use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{BudgetBand, NutritionFocus, PreferencePayload, RuleBasedRecommender};
use llm_client::OpenAiClient;
use menu_catalog::{Category, Dish, MenuCatalog};
use session::{ChatSession, ConversationTurn, RenderHint, Role, Step};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// DishChat - conversational ordering assistant
#[derive(Parser)]
#[command(name = "dish-chat")]
#[command(about = "Conversational menu recommendation assistant", long_about = None)]
struct Cli {
    /// Path to the menu JSON file
    #[arg(short, long, default_value = "data/menu.json")]
    menu: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive ordering conversation (requires OPENAI_API_KEY)
    Chat {
        /// Model used for all completion calls
        #[arg(long, default_value = "gpt-4")]
        model: String,

        /// Override the completions endpoint base URL
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Get offline rule-based recommendations
    Recommend {
        /// Budget band: 10-30, 30-50, or 50-100
        #[arg(long)]
        budget: Option<String>,

        /// Category preference, repeatable (e.g. --cuisine 热菜 --cuisine 汤品)
        #[arg(long)]
        cuisine: Vec<String>,

        /// Spice tolerance: 0 (none), 1 (mild), 2 (medium)
        #[arg(long)]
        spicy: Option<u8>,

        /// Ingredient to avoid, repeatable
        #[arg(long)]
        avoid: Vec<String>,

        /// Preferred ingredient, repeatable
        #[arg(long)]
        ingredient: Vec<String>,

        /// Nutrition focus: high_protein, low_calorie, balanced
        #[arg(long)]
        nutrition: Option<String>,

        /// Number of dishes to recommend
        #[arg(long, default_value = "6")]
        count: usize,
    },

    /// Search dishes by name
    Search {
        /// Dish name to search for (case-insensitive substring match)
        #[arg(long)]
        name: String,
    },

    /// List the menu, optionally limited to one category
    Menu {
        /// Category label (e.g. 热菜, 汤品, 主食)
        #[arg(long)]
        category: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading menu from {}...", cli.menu.display());
    let start = Instant::now();
    let catalog = Arc::new(
        MenuCatalog::load_from_file(&cli.menu).context("Failed to load menu file")?,
    );
    println!(
        "{} Loaded {} dishes in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Chat { model, base_url } => handle_chat(catalog, model, base_url).await?,
        Commands::Recommend {
            budget,
            cuisine,
            spicy,
            avoid,
            ingredient,
            nutrition,
            count,
        } => handle_recommend(catalog, budget, cuisine, spicy, avoid, ingredient, nutrition, count)?,
        Commands::Search { name } => handle_search(catalog, name),
        Commands::Menu { category } => handle_menu(catalog, category),
    }

    Ok(())
}

/// Handle the 'chat' command: an interactive REPL over a [`ChatSession`].
async fn handle_chat(
    catalog: Arc<MenuCatalog>,
    model: String,
    base_url: Option<String>,
) -> Result<()> {
    let api_key = std::env::var("OPENAI_API_KEY")
        .map_err(|_| anyhow!("OPENAI_API_KEY is not set"))?;
    let mut client = OpenAiClient::new(api_key);
    if let Some(url) = base_url {
        client = client.with_base_url(url);
    }
    let service: Arc<dyn llm_client::CompletionService> = Arc::new(client);
    let pipeline = session::ChatPipeline::new(Arc::clone(&catalog), Arc::clone(&service))
        .with_model(model);
    let mut session = ChatSession::new(catalog, service).with_pipeline(pipeline);

    println!();
    println!("{}", "输入消息开始点餐，输入 /cart 查看购物车，exit 退出。".dimmed());
    session.start();

    let mut printed = 0;
    let stdin = io::stdin();
    loop {
        printed = print_new_turns(&session, printed);
        print!("{} ", ">".bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();
        match input {
            "" => continue,
            "exit" | "quit" | "退出" => break,
            "/cart" => {
                print_cart(&session);
                continue;
            }
            _ => {}
        }

        // Quick-reply steps accept a typed option verbatim.
        let is_option_tap = matches!(session.current_step(), Step::CuisinePreference | Step::Budget)
            && session
                .turns()
                .last()
                .is_some_and(|t| t.options.iter().any(|o| o == input));
        if is_option_tap {
            session.select_option(input).await;
        } else {
            session.send_text(input).await;
        }
    }

    println!("{}", "欢迎下次光临！".green());
    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    catalog: Arc<MenuCatalog>,
    budget: Option<String>,
    cuisine: Vec<String>,
    spicy: Option<u8>,
    avoid: Vec<String>,
    ingredient: Vec<String>,
    nutrition: Option<String>,
    count: usize,
) -> Result<()> {
    let mut prefs = PreferencePayload::default().with_count(count);
    if let Some(label) = budget {
        let band = BudgetBand::parse(&label)
            .ok_or_else(|| anyhow!("Unknown budget band '{label}', expected 10-30, 30-50, or 50-100"))?;
        prefs = prefs.with_budget(band);
    }
    if !cuisine.is_empty() {
        prefs = prefs.with_cuisine(cuisine);
    }
    if let Some(level) = spicy {
        prefs = prefs.with_spicy_tolerance(level);
    }
    if !avoid.is_empty() {
        prefs = prefs.with_restrictions(avoid);
    }
    if !ingredient.is_empty() {
        prefs = prefs.with_preferred_ingredients(ingredient);
    }
    if let Some(focus) = nutrition {
        prefs = prefs.with_nutrition_focus(parse_nutrition_focus(&focus)?);
    }

    let recommender = RuleBasedRecommender::new(catalog);
    let dishes = recommender.recommend(&prefs)?;

    if dishes.is_empty() {
        println!("{}", "No dishes match these preferences.".yellow());
        return Ok(());
    }
    println!("{}", "Recommendations:".bold().blue());
    for (rank, dish) in dishes.iter().enumerate() {
        print_dish_line(rank + 1, dish);
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(catalog: Arc<MenuCatalog>, name: String) {
    let needle = name.to_lowercase();
    let mut matches: Vec<(&Dish, usize)> = catalog
        .dishes()
        .iter()
        .filter_map(|dish| {
            let haystack = dish.name.to_lowercase();
            if haystack == needle {
                Some((dish, 0))
            } else if haystack.contains(&needle) {
                Some((dish, 1))
            } else {
                None
            }
        })
        .collect();
    // Exact matches first, catalog order within each group.
    matches.sort_by_key(|&(_, relevance)| relevance);

    println!("{}", format!("Search results for '{}':", name).bold().blue());
    if matches.is_empty() {
        println!("{}", "No matching dishes.".yellow());
        return;
    }
    for (rank, (dish, _)) in matches.iter().take(20).enumerate() {
        print_dish_line(rank + 1, dish);
    }
}

/// Handle the 'menu' command
fn handle_menu(catalog: Arc<MenuCatalog>, category: Option<String>) {
    match category {
        Some(label) => {
            let category = Category::parse(&label);
            println!("{}", format!("{}:", category.label()).bold().blue());
            let ids = catalog.ids_in_category(category);
            if ids.is_empty() {
                println!("{}", "No dishes in this category.".yellow());
                return;
            }
            for (rank, id) in ids.iter().enumerate() {
                if let Some(dish) = catalog.get(id) {
                    print_dish_line(rank + 1, dish);
                }
            }
        }
        None => {
            println!("{}", "Full menu:".bold().blue());
            for (rank, dish) in catalog.dishes().iter().enumerate() {
                print_dish_line(rank + 1, dish);
            }
        }
    }
}

fn parse_nutrition_focus(s: &str) -> Result<NutritionFocus> {
    match s {
        "high_protein" => Ok(NutritionFocus::HighProtein),
        "low_calorie" => Ok(NutritionFocus::LowCalorie),
        "balanced" => Ok(NutritionFocus::Balanced),
        "no_preference" => Ok(NutritionFocus::NoPreference),
        other => Err(anyhow!(
            "Unknown nutrition focus '{other}', expected high_protein, low_calorie, or balanced"
        )),
    }
}

/// Prints transcript turns added since the last call, returns the new count.
fn print_new_turns(session: &ChatSession, printed: usize) -> usize {
    for turn in &session.turns()[printed..] {
        print_turn(turn);
    }
    session.turns().len()
}

fn print_turn(turn: &ConversationTurn) {
    match turn.role {
        Role::Assistant => println!("{} {}", "助手:".green().bold(), turn.content),
        Role::User => println!("{} {}", "我:".blue().bold(), turn.content),
        Role::System => println!("{}", turn.content.dimmed()),
    }
    match turn.render_hint {
        Some(RenderHint::OptionsSelector) => {
            println!("   {}", format!("[{}]", turn.options.join(" | ")).cyan());
        }
        Some(RenderHint::DishCards) => {
            for (rank, dish) in turn.dishes.iter().enumerate() {
                print_dish_line(rank + 1, dish);
            }
        }
        None => {}
    }
}

fn print_dish_line(rank: usize, dish: &Dish) {
    println!(
        "{}. {} ({}) ¥{:.1} [{}] {}",
        rank.to_string().green(),
        dish.name.bold(),
        dish.id.dimmed(),
        dish.price,
        dish.category.label(),
        dish.spice_label()
    );
    if !dish.description.is_empty() {
        println!("   {}", dish.description.dimmed());
    }
    println!("   {}", dish.nutrition_summary().dimmed());
}

fn print_cart(session: &ChatSession) {
    let cart = session.cart();
    if cart.is_empty() {
        println!("{}", "购物车是空的。".yellow());
        return;
    }
    println!("{}", "购物车:".bold().blue());
    for line in cart.lines() {
        if let Some(dish) = session.catalog().get(&line.dish_id) {
            println!(
                "  {} x{} ¥{:.1}",
                dish.name,
                line.quantity,
                dish.price * f64::from(line.quantity)
            );
        }
    }
    println!("{}", format!("合计: ¥{:.1}", session.cart_total()).bold());
}
