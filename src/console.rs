use crate::analyzer::ShopAnalysis;
use crate::engine::Engine;
use crate::source::ListingSource;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const WELCOME_MESSAGE: &str =
    "Welcome to the Etsy Top Terms Identifier. Press Enter to begin.";
pub const USER_PROMPT: &str =
    "Enter the name of an Etsy store you want analysed. Type 'exit' to quit the program: ";
pub const CONNECTION_ERROR_MESSAGE: &str =
    "It looks like you don't have internet. Please connect to the internet and press enter to try again.";
pub const CANNOT_FIND_SHOP_MESSAGE: &str = "Sorry! We can't find ";
pub const RUNNING_ANALYSIS_MESSAGE: &str =
    "Running Analysis... Depending on your internet connection, this may take a moment.";
pub const NO_INPUT_MESSAGE: &str = "No user input detected. Please try again.";
pub const DEFAULT_ANALYSIS_DONE_MESSAGE: &str =
    "The above are the top terms for the default Etsy shops";

/// Render one analysis the way the console prints it
pub fn render_analysis(analysis: &ShopAnalysis, top_n: usize) -> String {
    match &analysis.top_words {
        Some(words) => {
            let pairs: Vec<String> = words
                .iter()
                .map(|wc| format!("({}, {})", wc.word, wc.count))
                .collect();
            format!(
                "Top {} Words for {}:\n{}\n\n",
                top_n,
                analysis.shop,
                pairs.join(" ")
            )
        }
        None => format!("{}{}\n", CANNOT_FIND_SHOP_MESSAGE, analysis.shop),
    }
}

/// Interactive read-eval loop over a shop engine
pub struct Console<'a, S, R, W> {
    engine: &'a Engine<S>,
    input: R,
    output: W,
}

impl<'a, S, R, W> Console<'a, S, R, W>
where
    S: ListingSource,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(engine: &'a Engine<S>, input: R, output: W) -> Self {
        Self {
            engine,
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    async fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }

    async fn say(&mut self, line: &str) -> io::Result<()> {
        self.write(line).await?;
        self.write("\n").await
    }

    /// Next input line without its terminator; `None` at end of input
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line).await? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&line);
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    async fn print_analyses(&mut self, analyses: &[ShopAnalysis]) -> io::Result<()> {
        let top_n = self.engine.analyzer().top_n();
        for analysis in analyses {
            self.write(&render_analysis(analysis, top_n)).await?;
        }
        Ok(())
    }

    /// Analyze the given shops, retrying after each connectivity failure
    /// once the user presses Enter. Returns `false` if input ran out first.
    pub async fn default_analysis(&mut self, shops: &[String]) -> io::Result<bool> {
        loop {
            self.say(RUNNING_ANALYSIS_MESSAGE).await?;
            match self.engine.analyze_shops(shops).await {
                Ok(analyses) => {
                    self.print_analyses(&analyses).await?;
                    self.say(DEFAULT_ANALYSIS_DONE_MESSAGE).await?;
                    return Ok(true);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "default analysis failed");
                    self.say(CONNECTION_ERROR_MESSAGE).await?;
                    if self.read_line().await?.is_none() {
                        return Ok(false);
                    }
                }
            }
        }
    }

    /// Prompt for shop names until `exit` or end of input
    pub async fn prompt_loop(&mut self) -> io::Result<()> {
        loop {
            self.write(USER_PROMPT).await?;
            let Some(command) = self.read_line().await? else {
                self.say("").await?;
                return Ok(());
            };
            let shop = command.trim();

            if shop.eq_ignore_ascii_case("exit") {
                return Ok(());
            }
            if shop.is_empty() {
                self.say(NO_INPUT_MESSAGE).await?;
                continue;
            }

            self.say(RUNNING_ANALYSIS_MESSAGE).await?;
            match self.engine.analyze_shop(shop).await {
                Ok(analysis) => self.print_analyses(&[analysis]).await?,
                Err(err) => {
                    tracing::warn!(shop, error = %err, "analysis failed");
                    self.say(CONNECTION_ERROR_MESSAGE).await?;
                }
            }
        }
    }

    /// Full session: welcome, optional default analysis, then the prompt loop
    pub async fn run(&mut self, default_shops: Option<&[String]>) -> io::Result<()> {
        self.say(WELCOME_MESSAGE).await?;
        if self.read_line().await?.is_none() {
            return Ok(());
        }

        if let Some(shops) = default_shops.filter(|shops| !shops.is_empty()) {
            if !self.default_analysis(shops).await? {
                return Ok(());
            }
        }

        self.prompt_loop().await
    }
}
