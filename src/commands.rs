//! Command types for the Elm-style architecture
//!
//! Commands represent side effects the host should perform after an update.

use std::time::Instant;

/// Field regions that can be independently redrawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DamageArea {
    /// The editing surface (or preview body)
    Surface,
    /// Toolbar buttons and their active flags
    Toolbar,
    /// The character counter
    Counter,
}

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Redraw specific areas
    Redraw(Vec<DamageArea>),
    /// Send `Msg::Paint` at the next paint opportunity
    RequestPaint,
    /// Send `Msg::Tick` at (or after) this instant
    WakeAt(Instant),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch, flattening away `None`s
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| *c != Cmd::None).collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    /// Redraw everything
    pub fn redraw_all() -> Self {
        Cmd::Redraw(vec![
            DamageArea::Surface,
            DamageArea::Toolbar,
            DamageArea::Counter,
        ])
    }

    pub fn redraw_toolbar() -> Self {
        Cmd::Redraw(vec![DamageArea::Toolbar])
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::Redraw(areas) => !areas.is_empty(),
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            Cmd::None | Cmd::RequestPaint | Cmd::WakeAt(_) => false,
        }
    }

    /// All areas this command redraws, deduplicated
    pub fn damage(&self) -> Vec<DamageArea> {
        let mut areas = Vec::new();
        self.collect_damage(&mut areas);
        areas
    }

    fn collect_damage(&self, out: &mut Vec<DamageArea>) {
        match self {
            Cmd::Redraw(areas) => {
                for area in areas {
                    if !out.contains(area) {
                        out.push(*area);
                    }
                }
            }
            Cmd::Batch(cmds) => cmds.iter().for_each(|c| c.collect_damage(out)),
            Cmd::None | Cmd::RequestPaint | Cmd::WakeAt(_) => {}
        }
    }

    /// Earliest wake-up requested by this command
    pub fn wake_at(&self) -> Option<Instant> {
        match self {
            Cmd::WakeAt(at) => Some(*at),
            Cmd::Batch(cmds) => cmds.iter().filter_map(Cmd::wake_at).min(),
            _ => None,
        }
    }

    pub fn requests_paint(&self) -> bool {
        match self {
            Cmd::RequestPaint => true,
            Cmd::Batch(cmds) => cmds.iter().any(Cmd::requests_paint),
            _ => false,
        }
    }
}

// Allow converting Option<Cmd> to Cmd
impl From<Option<Cmd>> for Cmd {
    fn from(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_batch_flattens() {
        assert_eq!(Cmd::batch(vec![Cmd::None, Cmd::None]), Cmd::None);
        assert_eq!(
            Cmd::batch(vec![Cmd::None, Cmd::RequestPaint]),
            Cmd::RequestPaint
        );
    }

    #[test]
    fn test_damage_and_wake_merge() {
        let now = Instant::now();
        let cmd = Cmd::batch(vec![
            Cmd::redraw_toolbar(),
            Cmd::WakeAt(now + Duration::from_millis(100)),
            Cmd::redraw_all(),
            Cmd::WakeAt(now + Duration::from_millis(50)),
        ]);
        assert!(cmd.needs_redraw());
        assert_eq!(
            cmd.damage(),
            vec![DamageArea::Toolbar, DamageArea::Surface, DamageArea::Counter]
        );
        assert_eq!(cmd.wake_at(), Some(now + Duration::from_millis(50)));
        assert!(!cmd.requests_paint());
    }
}
