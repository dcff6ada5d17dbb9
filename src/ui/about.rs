// SPDX-License-Identifier: MPL-2.0
//! About screen: version and a short description.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use iced::widget::{Column, Container, Text};
use iced::{alignment, Element, Length};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn view(i18n: &I18n) -> Element<'_, crate::app::Message> {
    let content = Column::new()
        .spacing(spacing::SM)
        .align_x(alignment::Horizontal::Center)
        .push(Text::new(i18n.tr("app-title")).size(typography::TITLE_LG))
        .push(
            Text::new(i18n.tr_with_args("about-version", &[("version", VERSION)]))
                .size(typography::BODY),
        )
        .push(
            Text::new(i18n.tr("about-description"))
                .size(typography::BODY)
                .color(palette::GRAY_400),
        );

    Container::new(content)
        .width(Length::Fill)
        .padding(spacing::XL)
        .align_x(alignment::Horizontal::Center)
        .style(styles::container::panel)
        .into()
}
