//! Extension panel definitions and their XML form for `SavePanel`.

use std::fmt::Write as _;

use shared::{
    domain::{PageId, PanelId, WidgetId},
    protocol::UiCommand,
};

const PANEL_ORDER: u32 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelLocation {
    ControlPanel,
    Hidden,
}

impl PanelLocation {
    fn as_str(self) -> &'static str {
        match self {
            PanelLocation::ControlPanel => "ControlPanel",
            PanelLocation::Hidden => "Hidden",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupButtonValue {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetDefinition {
    Text {
        widget_id: WidgetId,
        text: String,
    },
    GroupButton {
        widget_id: WidgetId,
        values: Vec<GroupButtonValue>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDefinition {
    pub page_id: PageId,
    pub name: String,
    pub rows: Vec<WidgetDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelDefinition {
    pub panel_id: PanelId,
    pub name: String,
    pub icon: String,
    pub location: PanelLocation,
    pub page: Option<PageDefinition>,
}

impl PanelDefinition {
    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<Extensions><Panel>");
        let _ = write!(
            xml,
            "<Order>{PANEL_ORDER}</Order><Origin>local</Origin><Location>{}</Location><Icon>{}</Icon><Name>{}</Name><ActivityType>Custom</ActivityType>",
            self.location.as_str(),
            escape_text(&self.icon),
            escape_text(&self.name),
        );

        if let Some(page) = &self.page {
            let _ = write!(xml, "<Page><Name>{}</Name>", escape_text(&page.name));
            for widget in &page.rows {
                xml.push_str("<Row><Name>Row</Name>");
                write_widget(&mut xml, widget);
                xml.push_str("</Row>");
            }
            let _ = write!(
                xml,
                "<PageId>{}</PageId><Options>hideRowNames=1</Options></Page>",
                escape_text(page.page_id.as_str())
            );
        }

        xml.push_str("</Panel></Extensions>");
        xml
    }

    pub fn save_command(&self) -> UiCommand {
        UiCommand::SavePanel {
            panel_id: self.panel_id.clone(),
            body: self.to_xml(),
        }
    }
}

fn write_widget(xml: &mut String, widget: &WidgetDefinition) {
    match widget {
        WidgetDefinition::Text { widget_id, text } => {
            let _ = write!(
                xml,
                "<Widget><WidgetId>{}</WidgetId><Name>{}</Name><Type>Text</Type><Options>size=4;fontSize=normal;align=center</Options></Widget>",
                escape_text(widget_id.as_str()),
                escape_text(text),
            );
        }
        WidgetDefinition::GroupButton { widget_id, values } => {
            let _ = write!(
                xml,
                "<Widget><WidgetId>{}</WidgetId><Type>GroupButton</Type><Options>size=4</Options><ValueSpace>",
                escape_text(widget_id.as_str()),
            );
            for value in values {
                let _ = write!(
                    xml,
                    "<Value><Key>{}</Key><Name>{}</Name></Value>",
                    escape_text(&value.key),
                    escape_text(&value.name),
                );
            }
            xml.push_str("</ValueSpace></Widget>");
        }
    }
}

fn escape_text(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
#[path = "tests/panels_tests.rs"]
mod tests;
