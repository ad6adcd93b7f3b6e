//! Raspberry Pi Pico - "Blinka Maze" board support and frame loop
//!
//! ST7735 160x128 display on SPI0, four d-pad buttons (active-low):
//!   Up GP2, Down GP3, Left GP4, Right GP5
//! LED (GP25): ON while playing, OFF once the game is won or lost

#![no_std]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::spi::{self, Spi};
use embassy_rp::usb::{Driver, InterruptHandler as UsbInterruptHandler};
use embassy_time::{Delay, Duration, Instant, Timer};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_hal_bus::spi::ExclusiveDevice;
use maze_core::{Bank, Buttons, GameSession, Rules, Stage};
use mipidsi::Builder;
use mipidsi::models::ST7735s;
use mipidsi::options::{ColorInversion, ColorOrder, Orientation, Rotation};
use static_cell::StaticCell;

/// Sprite bank, regenerated by `tools/make_sprites.py`.
static SPRITES: &[u8] = include_bytes!("../../img/sprites.bmp");

// --- Display ---
const DISPLAY_W: u16 = 160;
const DISPLAY_H: u16 = 128;
const SPI_HZ: u32 = 32_000_000;

// --- Embassy bindings ---
bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => UsbInterruptHandler<USB>;
});

#[embassy_executor::task]
async fn logger_task(driver: Driver<'static, USB>) {
    embassy_usb_logger::run!(1024, log::LevelFilter::Info, driver);
}

/// D-pad inputs, pulled up; a pressed button reads low.
struct Dpad<'d> {
    up: Input<'d>,
    down: Input<'d>,
    left: Input<'d>,
    right: Input<'d>,
}

impl Dpad<'_> {
    fn read(&self) -> Buttons {
        Buttons::from_pressed(
            self.up.is_low(),
            self.down.is_low(),
            self.left.is_low(),
            self.right.is_low(),
        )
    }
}

/// Brings up the board and runs `rules` until power-off.
pub async fn run(spawner: Spawner, rules: Rules) {
    let p = embassy_rp::init(Default::default());

    // USB serial logger
    let usb_driver = Driver::new(p.USB, Irqs);
    unwrap!(spawner.spawn(logger_task(usb_driver)));
    Timer::after(Duration::from_secs(2)).await;
    log::info!("=== Blinka Maze ({:?}) ===", rules);

    // Onboard LED (GP25 on Pico)
    let mut led = Output::new(p.PIN_25, Level::Low);

    // ST7735 display
    let _bl = Output::new(p.PIN_20, Level::High);
    let rst = Output::new(p.PIN_21, Level::High);
    let mut spi_config = spi::Config::default();
    spi_config.frequency = SPI_HZ;
    let spi_bus = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let cs_display = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let spi_device = ExclusiveDevice::new_no_delay(spi_bus, cs_display).unwrap();
    static DISPLAY_BUF: StaticCell<[u8; 1024]> = StaticCell::new();
    let display_buf = DISPLAY_BUF.init([0u8; 1024]);
    let di = mipidsi::interface::SpiInterface::new(spi_device, dc, display_buf);
    let mut display = Builder::new(ST7735s, di)
        .reset_pin(rst)
        .display_size(DISPLAY_H, DISPLAY_W)
        .color_order(ColorOrder::Bgr)
        .invert_colors(ColorInversion::Normal)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .init(&mut Delay)
        .unwrap();
    display.clear(Rgb565::BLACK).unwrap();
    log::info!("Display ready!");

    let dpad = Dpad {
        up: Input::new(p.PIN_2, Pull::Up),
        down: Input::new(p.PIN_3, Pull::Up),
        left: Input::new(p.PIN_4, Pull::Up),
        right: Input::new(p.PIN_5, Pull::Up),
    };

    // Game
    let bank = unwrap!(Bank::new(SPRITES));
    let bank_frames = bank.frame_count();
    let mut session = unwrap!(GameSession::new(rules));
    let mut stage = Stage::new(bank);
    let frame_period = Duration::from_millis(session.config().frame_period_ms());

    stage.render_block(&mut display, &session).unwrap();
    led.set_high();
    info!("Entering game loop ({} bank frames, {} ms per frame)", bank_frames, frame_period.as_millis());

    loop {
        let frame_start = Instant::now();

        let buttons = dpad.read();
        let step = session.step(buttons);
        stage.render_step(&mut display, &session, &step).unwrap();

        if step.finished {
            led.set_low();
            info!("{} - {}", step.state, session.message().unwrap_or(""));
        }

        Timer::at(frame_start + frame_period).await;
    }
}
