use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// A named numeric slot shared between the host and every expression that references it.
///
/// Cloning a `Variable` clones the handle, not the value: all clones read and write
/// the same cell. The handle is neither `Send` nor `Sync`, so a tree and the cells it
/// reads stay on one thread.
#[derive(Clone, Default)]
pub struct Variable {
    cell: Rc<Cell<f64>>,
}

impl Variable {
    pub fn new(value: f64) -> Self {
        Self {
            cell: Rc::new(Cell::new(value)),
        }
    }

    /// Current value of the cell.
    pub fn get(&self) -> f64 {
        self.cell.get()
    }

    /// Replaces the value. Every expression holding this cell sees it on its next `eval`.
    pub fn set(&self, value: f64) {
        self.cell.set(value);
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Variable").field(&self.get()).finish()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.get(), f)
    }
}
