use opposite::{Edit, EditError, Editor, History, Signal};

enum Step {
    Execute(Edit),
    Undo,
    Redo,
}

fn run(editor: &mut Editor<Edit, impl FnMut(Signal)>, steps: Vec<Step>) -> Result<(), EditError> {
    for step in steps {
        match step {
            Step::Execute(edit) => {
                let label = edit.to_string();
                editor.execute(edit)?;
                println!("{label:<24} {:?}", editor.target());
            }
            Step::Undo => {
                let label = editor.history().undo_text();
                if let Some(result) = editor.undo() {
                    result?;
                }
                let label = label.map_or_else(|| "Undo".to_string(), |text| format!("Undo: {text}"));
                println!("{label:<24} {:?}", editor.target());
            }
            Step::Redo => {
                let label = editor.history().redo_text();
                if let Some(result) = editor.redo() {
                    result?;
                }
                let label = label.map_or_else(|| "Redo".to_string(), |text| format!("Redo: {text}"));
                println!("{label:<24} {:?}", editor.target());
            }
        }
    }
    Ok(())
}

fn main() -> Result<(), EditError> {
    tracing_subscriber::fmt::init();

    let history = History::builder()
        .connect(|signal: Signal| tracing::debug!(?signal, "history changed"))
        .build();
    let mut editor = Editor::with_history(String::from("hello world"), history);
    println!("{:<24} {:?}", "Start", editor.target());

    use Step::*;
    run(
        &mut editor,
        vec![
            Execute(Edit::AppendAtEnd('a')),
            Execute(Edit::AppendAtEnd('b')),
            Undo,
            Undo,
            Redo,
            Execute(Edit::remove_from_end()),
            Execute(Edit::remove_from_end()),
            Undo,
            Undo,
            Redo,
            Redo,
            Undo,
            Execute(Edit::remove_from_start()),
            Execute(Edit::remove_from_start()),
            Undo,
            Undo,
            Redo,
            Execute(Edit::CapitalizeAt(2)),
            Execute(Edit::CapitalizeAt(0)),
            Undo,
            Undo,
            Redo,
            Execute(Edit::LowercaseAt(2)),
            Undo,
            Redo,
            Execute(Edit::to_title_case()),
            Undo,
            Redo,
            Execute(Edit::AppendAtEnd('s')),
            Execute(Edit::AppendAtStart('h')),
            Execute(Edit::remove_from_end()),
            Execute(Edit::LowercaseAt(1)),
            Execute(Edit::to_title_case()),
            Undo,
            Undo,
            Undo,
            Undo,
            Undo,
            Redo,
            Redo,
        ],
    )?;

    #[allow(unused_mut)]
    let mut display = editor.history().display();
    #[cfg(feature = "colored")]
    display.colored(false);
    println!("\n{}", display.detailed(false));

    if let Err(err) = editor.execute(Edit::CapitalizeAt(99)) {
        println!("{err}");
    }
    Ok(())
}
