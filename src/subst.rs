use crate::token::is_var_char;
use crate::vars::VarStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Plain,
    Escape,
    VariableName,
}

/// Expand `$NAME` references and backslash escapes in `input`.
///
/// `\x` copies `x` verbatim, so `\$` and `\\` produce a literal `$`
/// and `\`. Unbound variables expand to the empty string, as does a
/// `$` not followed by a name character.
///
/// ```
/// use gosh::{MapVarStore, substitute};
///
/// let store: MapVarStore = [("HOME", "/home/alice")].into_iter().collect();
/// assert_eq!(substitute("cd $HOME/x", &store), "cd /home/alice/x");
/// assert_eq!(substitute(r"echo \$HOME", &store), "echo $HOME");
/// ```
#[must_use]
pub fn substitute<S: VarStore + ?Sized>(input: &str, store: &S) -> String {
    let mut out = String::with_capacity(input.len());
    let mut name = String::new();
    let mut state = State::Plain;

    for ch in input.chars() {
        if state == State::VariableName {
            if is_var_char(ch) {
                name.push(ch);
                continue;
            }
            resolve(&mut name, store, &mut out);
            state = State::Plain;
        }

        match state {
            State::Escape => {
                out.push(ch);
                state = State::Plain;
            }
            _ => match ch {
                '$' => state = State::VariableName,
                '\\' => state = State::Escape,
                _ => out.push(ch),
            },
        }
    }

    if state == State::VariableName {
        resolve(&mut name, store, &mut out);
    }

    log::debug!("substituted {input:?} -> {out:?}");
    out
}

fn resolve<S: VarStore + ?Sized>(name: &mut String, store: &S, out: &mut String) {
    if !name.is_empty() {
        out.push_str(&store.get(name));
        name.clear();
    }
}
