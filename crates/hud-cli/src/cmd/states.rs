use crate::output::{print_json, print_table};
use hud_core::scene::SceneParams;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct StateRow<'a> {
    index: usize,
    title: &'a str,
    offset: f64,
    #[serde(flatten)]
    params: &'a SceneParams,
}

pub fn run(root: &Path, config: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let config = super::load_config(root, config)?;
    let layout = &config.layout;

    if json {
        let rows: Vec<StateRow> = config
            .states
            .iter()
            .enumerate()
            .map(|(i, s)| StateRow {
                index: i + 1,
                title: &s.title,
                offset: layout.offset_of(i),
                params: &s.params,
            })
            .collect();
        return print_json(&rows);
    }

    if config.states.is_empty() {
        println!("No states defined.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = config
        .states
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let flags = s.params.flags();
            vec![
                (i + 1).to_string(),
                s.title.clone(),
                layout.offset_of(i).to_string(),
                s.params.stability_readout().to_string(),
                s.params.dust.to_string(),
                if flags.is_empty() {
                    "-".to_string()
                } else {
                    flags.join(",")
                },
            ]
        })
        .collect();
    print_table(&["#", "TITLE", "OFFSET", "STABILITY", "DUST", "FLAGS"], &rows);
    Ok(())
}
