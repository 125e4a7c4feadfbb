//! Units, pages and plain page elements.

use std::cell::RefCell;
use std::rc::Rc;

use log::trace;

use crate::entities::{ObjectWithProperties, Properties, UnitElementObject, UnitObject, UnitPageObject};

use super::table::TableElement;

/// Generic element on a page (text box, image, ...). Tables use [`TableElement`].
pub struct UnitElement {
    id: String,
    element_type: String,
    props: Properties,
    pub render_count: usize,
}

impl UnitElement {
    pub fn new(id: &str, element_type: &str, props: Properties) -> Self {
        Self {
            id: id.to_string(),
            element_type: element_type.to_string(),
            props,
            render_count: 0,
        }
    }
}

impl ObjectWithProperties for UnitElement {
    fn id(&self) -> &str {
        &self.id
    }

    fn properties(&self) -> &Properties {
        &self.props
    }

    fn properties_mut(&mut self) -> &mut Properties {
        &mut self.props
    }
}

impl UnitElementObject for UnitElement {
    fn element_type(&self) -> &str {
        &self.element_type
    }

    fn element_id(&self) -> &str {
        &self.id
    }

    fn render(&mut self) {
        self.render_count += 1;
        trace!("Element {} ({}) rendered", self.id, self.element_type);
    }
}

/// Element slot on a page.
#[derive(Clone)]
pub enum PageElement {
    Plain(Rc<RefCell<UnitElement>>),
    Table(Rc<RefCell<TableElement>>),
}

impl PageElement {
    pub fn id(&self) -> String {
        match self {
            PageElement::Plain(e) => e.borrow().id().to_string(),
            PageElement::Table(t) => ObjectWithProperties::id(&*t.borrow()).to_string(),
        }
    }

    /// Shared handle as the element capability.
    pub fn as_element(&self) -> Rc<RefCell<dyn UnitElementObject>> {
        match self {
            PageElement::Plain(e) => e.clone(),
            PageElement::Table(t) => t.clone(),
        }
    }
}

pub struct UnitPage {
    id: String,
    props: Properties,
    pub elements: Vec<PageElement>,
    pub render_count: usize,
}

impl UnitPage {
    pub fn new(id: &str, props: Properties) -> Self {
        Self {
            id: id.to_string(),
            props,
            elements: Vec::new(),
            render_count: 0,
        }
    }

    pub fn with_element(mut self, element: PageElement) -> Self {
        self.elements.push(element);
        self
    }
}

impl ObjectWithProperties for UnitPage {
    fn id(&self) -> &str {
        &self.id
    }

    fn properties(&self) -> &Properties {
        &self.props
    }

    fn properties_mut(&mut self) -> &mut Properties {
        &mut self.props
    }
}

impl UnitPageObject for UnitPage {
    /// Re-renders every element on the page as well.
    fn render(&mut self) {
        self.render_count += 1;
        for element in &self.elements {
            element.as_element().borrow_mut().render();
        }
        trace!("Page {} rendered", self.id);
    }
}

/// Top-level authoring unit.
pub struct Unit {
    id: String,
    props: Properties,
    pub pages: Vec<Rc<RefCell<UnitPage>>>,
    pub render_count: usize,
}

impl Unit {
    pub fn new(id: &str, props: Properties) -> Self {
        Self {
            id: id.to_string(),
            props,
            pages: Vec::new(),
            render_count: 0,
        }
    }
}

impl ObjectWithProperties for Unit {
    fn id(&self) -> &str {
        &self.id
    }

    fn properties(&self) -> &Properties {
        &self.props
    }

    fn properties_mut(&mut self) -> &mut Properties {
        &mut self.props
    }
}

impl UnitObject for Unit {
    fn render(&mut self) {
        self.render_count += 1;
        trace!("Unit {} rendered ({} pages)", self.id, self.pages.len());
    }
}
